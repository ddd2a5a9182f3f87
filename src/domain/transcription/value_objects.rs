//! Transcription Context - Value Objects

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::DecodeOptionsError;

/// 任务类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TaskKind {
    /// 原语言转写
    #[default]
    Transcribe,
    /// 翻译为英文
    Translate,
}

impl TaskKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskKind::Transcribe => "Transcribe",
            TaskKind::Translate => "Translate",
        }
    }
}

/// 需要抑制的 token
///
/// `text` 与 `tokens` 互为描述，并不互斥。默认 `text = "-1"`（后端的默认抑制集合）。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuppressTokens {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub tokens: Option<BTreeSet<i32>>,
}

impl Default for SuppressTokens {
    fn default() -> Self {
        Self {
            text: Some("-1".to_string()),
            tokens: None,
        }
    }
}

/// 单个文件的解码参数
///
/// 字段名与后端 `transcription.run_batch` 的请求体一致，`task_kind` 在线上名为 `task`。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecodeOptions {
    #[serde(rename = "task")]
    pub task_kind: TaskKind,
    pub language: Option<String>,
    pub temperature: f32,
    pub sample_len: Option<u32>,
    pub best_of: Option<u32>,
    pub beam_size: Option<u32>,
    pub patience: Option<f32>,
    pub length_penalty: Option<f32>,
    pub prompt: Option<i64>,
    pub prefix: Option<i64>,
    pub suppress_tokens: SuppressTokens,
    pub suppress_blank: bool,
    pub without_timestamps: bool,
    pub max_initial_timestamp: Option<f32>,
    pub fp16: bool,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            task_kind: TaskKind::Transcribe,
            language: None,
            temperature: 0.0,
            sample_len: None,
            best_of: None,
            beam_size: None,
            patience: None,
            length_penalty: None,
            prompt: None,
            prefix: None,
            suppress_tokens: SuppressTokens::default(),
            suppress_blank: true,
            without_timestamps: false,
            max_initial_timestamp: None,
            fp16: true,
        }
    }
}

impl DecodeOptions {
    pub fn with_task_kind(mut self, task_kind: TaskKind) -> Self {
        self.task_kind = task_kind;
        self
    }

    /// 检查参数组合是否合法
    ///
    /// 规则与后端解码器一致：
    /// - 浮点参数必须是有限值
    /// - temperature >= 0
    /// - best_of 与 beam_size 互斥，best_of 只用于采样
    /// - patience 依赖 beam_size
    /// - length_penalty 在 [0, 1]
    pub fn validate(&self) -> Result<(), DecodeOptionsError> {
        for (name, value) in [
            ("temperature", Some(self.temperature)),
            ("patience", self.patience),
            ("length_penalty", self.length_penalty),
            ("max_initial_timestamp", self.max_initial_timestamp),
        ] {
            if value.is_some_and(|v| !v.is_finite()) {
                return Err(DecodeOptionsError::NonFinite(name));
            }
        }
        if self.temperature < 0.0 {
            return Err(DecodeOptionsError::NegativeTemperature(self.temperature));
        }
        for (name, value) in [
            ("sample_len", self.sample_len),
            ("best_of", self.best_of),
            ("beam_size", self.beam_size),
        ] {
            if value == Some(0) {
                return Err(DecodeOptionsError::ZeroCount(name));
            }
        }
        if self.best_of.is_some() && self.beam_size.is_some() {
            return Err(DecodeOptionsError::BestOfWithBeamSize);
        }
        if self.best_of.is_some() && self.temperature == 0.0 {
            return Err(DecodeOptionsError::BestOfWithGreedy);
        }
        if self.patience.is_some() && self.beam_size.is_none() {
            return Err(DecodeOptionsError::PatienceWithoutBeamSize);
        }
        if let Some(penalty) = self.length_penalty {
            if !(0.0..=1.0).contains(&penalty) {
                return Err(DecodeOptionsError::LengthPenaltyOutOfRange(penalty));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let options = DecodeOptions::default();
        assert_eq!(options.task_kind, TaskKind::Transcribe);
        assert_eq!(options.temperature, 0.0);
        assert!(options.suppress_blank);
        assert!(!options.without_timestamps);
        assert!(options.fp16);
        assert_eq!(options.suppress_tokens.text.as_deref(), Some("-1"));
        assert!(options.suppress_tokens.tokens.is_none());
        assert!(options.validate().is_ok());
    }

    #[test]
    fn test_wire_shape_uses_task_field() {
        let options = DecodeOptions::default().with_task_kind(TaskKind::Translate);
        let value = serde_json::to_value(&options).unwrap();
        assert_eq!(value["task"], "Translate");
        assert!(value.get("task_kind").is_none());
        assert_eq!(value["suppress_tokens"]["text"], "-1");
    }

    #[test]
    fn test_best_of_and_beam_size_conflict() {
        let options = DecodeOptions {
            temperature: 0.5,
            best_of: Some(5),
            beam_size: Some(5),
            ..Default::default()
        };
        assert_eq!(
            options.validate(),
            Err(DecodeOptionsError::BestOfWithBeamSize)
        );
    }

    #[test]
    fn test_best_of_requires_sampling() {
        let options = DecodeOptions {
            best_of: Some(3),
            ..Default::default()
        };
        assert_eq!(options.validate(), Err(DecodeOptionsError::BestOfWithGreedy));
    }

    #[test]
    fn test_patience_requires_beam_size() {
        let mut options = DecodeOptions {
            patience: Some(1.0),
            ..Default::default()
        };
        assert_eq!(
            options.validate(),
            Err(DecodeOptionsError::PatienceWithoutBeamSize)
        );

        options.beam_size = Some(5);
        assert!(options.validate().is_ok());
    }

    #[test]
    fn test_length_penalty_range() {
        let options = DecodeOptions {
            length_penalty: Some(1.5),
            ..Default::default()
        };
        assert!(options.validate().is_err());
    }

    #[test]
    fn test_non_finite_values_rejected() {
        for temperature in [f32::NAN, f32::INFINITY] {
            let options = DecodeOptions {
                temperature,
                best_of: Some(2),
                ..Default::default()
            };
            assert_eq!(
                options.validate(),
                Err(DecodeOptionsError::NonFinite("temperature"))
            );
        }

        let options = DecodeOptions {
            beam_size: Some(5),
            patience: Some(f32::NAN),
            ..Default::default()
        };
        assert_eq!(options.validate(), Err(DecodeOptionsError::NonFinite("patience")));

        let options = DecodeOptions {
            max_initial_timestamp: Some(f32::NEG_INFINITY),
            ..Default::default()
        };
        assert_eq!(
            options.validate(),
            Err(DecodeOptionsError::NonFinite("max_initial_timestamp"))
        );
    }

    #[test]
    fn test_zero_sample_len_rejected() {
        let options = DecodeOptions {
            sample_len: Some(0),
            ..Default::default()
        };
        assert_eq!(
            options.validate(),
            Err(DecodeOptionsError::ZeroCount("sample_len"))
        );
    }
}
