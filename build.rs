//! Stamps the build moment into `PROPVIS_BUILD_DATE` and `PROPVIS_BUILD_TIME`
//! for `propvis --version`. Either can be pinned from the environment for
//! reproducible builds.

use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use time::OffsetDateTime;

const STAMPS: [(&str, &[BorrowedFormatItem<'static>]); 2] = [
    ("PROPVIS_BUILD_DATE", format_description!("[year]-[month]-[day]")),
    ("PROPVIS_BUILD_TIME", format_description!("[hour]:[minute] UTC")),
];

fn main() {
    let now = OffsetDateTime::now_utc();
    for (var, format) in STAMPS {
        println!("cargo:rerun-if-env-changed={var}");
        let value = std::env::var(var)
            .ok()
            .or_else(|| now.format(format).ok())
            .unwrap_or_else(|| "unknown".into());
        println!("cargo:rustc-env={var}={value}");
    }
}
