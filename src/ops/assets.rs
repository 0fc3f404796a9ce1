// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Check that the frontend's static images are in place.

use anyhow::bail;
use std::path::Path;

/// Images the frontend pages reference.
pub const IMAGE_FILES: [&str; 17] = [
    "logo.svg",
    "hero-desktop.jpg",
    "process-1-register.svg",
    "process-2-notify.svg",
    "process-3-compare.svg",
    "badge-premium.svg",
    "category-servo-motor.jpg",
    "category-cylinder.jpg",
    "category-motor.jpg",
    "category-bearing.jpg",
    "category-lm-guide.jpg",
    "category-sensor.jpg",
    "category-plc.jpg",
    "category-inverter.jpg",
    "category-other.jpg",
    "seller-placeholder.svg",
    "og-image.jpg",
];

#[derive(Debug, Default)]
pub struct AssetReport {
    pub present: Vec<&'static str>,
    pub missing: Vec<&'static str>,
}

/// Report which images exist under `dir`. Fails when none do.
pub fn check_assets(dir: &Path) -> anyhow::Result<AssetReport> {
    let mut report = AssetReport::default();
    for name in IMAGE_FILES {
        if dir.join(name).is_file() {
            report.present.push(name);
        } else {
            report.missing.push(name);
        }
    }

    if report.present.is_empty() {
        bail!("no images found in {}", dir.display());
    }
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_set_is_reported() {
        let dir = std::env::temp_dir().join(format!(
            "catchfac-assets-{}",
            uuid::Uuid::new_v4().simple()
        ));
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("logo.svg"), "<svg/>").unwrap();

        let report = check_assets(&dir).unwrap();
        std::fs::remove_dir_all(&dir).ok();

        assert_eq!(report.present, vec!["logo.svg"]);
        assert_eq!(report.missing.len(), IMAGE_FILES.len() - 1);
    }

    #[test]
    fn empty_directory_fails() {
        let dir = std::env::temp_dir().join("catchfac-assets-does-not-exist");
        assert!(check_assets(&dir).is_err());
    }
}
