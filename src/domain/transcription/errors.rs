//! Transcription Context - Errors

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum DecodeOptionsError {
    #[error("{0} 必须是有限数值")]
    NonFinite(&'static str),

    #[error("temperature 不能为负数: {0}")]
    NegativeTemperature(f32),

    #[error("best_of 与 beam_size 不能同时设置")]
    BestOfWithBeamSize,

    #[error("best_of 只能用于采样解码（temperature > 0）")]
    BestOfWithGreedy,

    #[error("patience 需要同时设置 beam_size")]
    PatienceWithoutBeamSize,

    #[error("length_penalty 必须在 0 到 1 之间: {0}")]
    LengthPenaltyOutOfRange(f32),

    #[error("{0} 必须大于 0")]
    ZeroCount(&'static str),
}
