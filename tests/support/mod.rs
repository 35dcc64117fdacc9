#![allow(dead_code)]

use std::fs;
use std::path::PathBuf;

use sedori::testkit::{config, fixtures};
use tempfile::TempDir;

pub const MARKET_TOML: &str = r#"
[[keywords]]
keyword = "gameboy"
unavailable = ["Rakuma"]

[[keywords.domestic]]
platform = "Mercari"
title = "Game Boy Color"
price_jpy = 8000
url = "https://jp.mercari.com/item/m1"

[[keywords.domestic]]
platform = "Yahoo Auctions"
title = "Game Boy Pocket"
price_jpy = 12000

[[keywords.overseas]]
platform = "eBay"
price = 100

[[keywords.overseas]]
platform = "eBay"
price = 120

[[keywords.overseas]]
platform = "eBay"
price = 110

[[keywords.overseas]]
platform = "StockX"
price = 115
"#;

/// Config, reference data and market snapshot in a throwaway directory.
pub struct Workspace {
    pub dir: TempDir,
}

impl Workspace {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("create temp dir");
        let reference = dir.path().join("reference.toml");
        fs::write(&reference, fixtures::REFERENCE_TOML).expect("write reference data");
        fs::write(
            dir.path().join("config.toml"),
            config::config_toml(&reference),
        )
        .expect("write config");
        fs::write(dir.path().join("market.toml"), MARKET_TOML).expect("write snapshot");
        Self { dir }
    }

    pub fn config_path(&self) -> PathBuf {
        self.dir.path().join("config.toml")
    }

    pub fn snapshot_path(&self) -> PathBuf {
        self.dir.path().join("market.toml")
    }

    pub fn write(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        fs::write(&path, contents).expect("write workspace file");
        path
    }
}
