//! ユーザー設定 (eframe のストレージに保存)

use crate::viewer::{MAX_SCALE, MIN_SCALE};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// サンプル一覧ファイルを指定する環境変数
pub const SAMPLES_ENV: &str = "PDF_SIGNER_SAMPLES";

/// アプリケーション設定
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SignerConfig {
    /// ビューアーを開いたときの倍率
    pub initial_scale: f32,
    /// 署名枠のサイズ (画面ピクセル)
    pub signature_box: [f32; 2],
    pub dark_mode: bool,
    /// アップロードボタンの表示 (None なら既定)
    pub trigger_label: Option<String>,
    /// サンプル一覧 (JSON) のパス
    pub samples_path: Option<PathBuf>,
}

impl Default for SignerConfig {
    fn default() -> Self {
        Self {
            initial_scale: 1.0,
            signature_box: [100.0, 50.0],
            dark_mode: true,
            trigger_label: None,
            samples_path: None,
        }
    }
}

impl SignerConfig {
    /// ストレージから読み込み、環境変数で上書き
    pub fn load(storage: Option<&dyn eframe::Storage>) -> Self {
        let config: Self = storage
            .and_then(|s| eframe::get_value(s, eframe::APP_KEY))
            .unwrap_or_default();

        let env_path = std::env::var_os(SAMPLES_ENV).map(PathBuf::from);
        config.with_samples_override(env_path).sanitized()
    }

    /// ストレージに保存
    pub fn save(&self, storage: &mut dyn eframe::Storage) {
        eframe::set_value(storage, eframe::APP_KEY, self);
    }

    fn with_samples_override(mut self, path: Option<PathBuf>) -> Self {
        if path.is_some() {
            self.samples_path = path;
        }
        self
    }

    /// 範囲外の値を補正
    pub fn sanitized(mut self) -> Self {
        if !self.initial_scale.is_finite() {
            self.initial_scale = 1.0;
        }
        self.initial_scale = self.initial_scale.clamp(MIN_SCALE, MAX_SCALE);

        let defaults = Self::default().signature_box;
        for (value, default) in self.signature_box.iter_mut().zip(defaults) {
            if !value.is_finite() || *value <= 0.0 {
                *value = default;
            }
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_use_defaults() {
        let config: SignerConfig = serde_json::from_str(r#"{"dark_mode": false}"#).unwrap();
        assert!(!config.dark_mode);
        assert!(config.trigger_label.is_none());
        assert_eq!(config.signature_box, [100.0, 50.0]);
        assert_eq!(config.initial_scale, 1.0);
    }

    #[test]
    fn sanitize_clamps_out_of_range_values() {
        let config = SignerConfig {
            initial_scale: 9.0,
            signature_box: [-5.0, f32::NAN],
            ..Default::default()
        }
        .sanitized();

        assert_eq!(config.initial_scale, MAX_SCALE);
        assert_eq!(config.signature_box, [100.0, 50.0]);
    }

    #[test]
    fn env_override_replaces_stored_path() {
        let stored = SignerConfig {
            samples_path: Some(PathBuf::from("/stored.json")),
            ..Default::default()
        };
        let kept = stored.clone().with_samples_override(None);
        assert_eq!(kept.samples_path, Some(PathBuf::from("/stored.json")));

        let replaced = stored.with_samples_override(Some(PathBuf::from("/env.json")));
        assert_eq!(replaced.samples_path, Some(PathBuf::from("/env.json")));
    }

    #[test]
    fn load_without_storage_gives_defaults() {
        let config = SignerConfig::load(None);
        assert_eq!(config.initial_scale, 1.0);
        assert!(config.dark_mode);
    }
}
