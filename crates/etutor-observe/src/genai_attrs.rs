//! OpenTelemetry GenAI semantic-convention attribute names and values.
//!
//! Field names in `info_span!` must be literal, so these constants are used
//! with `Span::record` and as attribute values. Content-service spans are
//! named `gen_ai.{operation}`.

/// Operation being performed (one of the `OP_*` values).
pub const GEN_AI_OPERATION_NAME: &str = "gen_ai.operation.name";

/// Provider name (e.g. "gemini").
pub const GEN_AI_SYSTEM: &str = "gen_ai.system";

pub const GEN_AI_REQUEST_MODEL: &str = "gen_ai.request.model";
pub const GEN_AI_REQUEST_TEMPERATURE: &str = "gen_ai.request.temperature";
pub const GEN_AI_REQUEST_MAX_TOKENS: &str = "gen_ai.request.max_tokens";

pub const GEN_AI_USAGE_INPUT_TOKENS: &str = "gen_ai.usage.input_tokens";
pub const GEN_AI_USAGE_OUTPUT_TOKENS: &str = "gen_ai.usage.output_tokens";

/// Finish reason reported for the response.
pub const GEN_AI_RESPONSE_FINISH_REASONS: &str = "gen_ai.response.finish_reasons";

// --- Operation name values ---

/// Three-bullet lesson summary.
pub const OP_SUMMARIZE: &str = "summarize";

/// Structured quiz generation.
pub const OP_GENERATE_QUIZ: &str = "generate_quiz";

/// Tutor chat turn.
pub const OP_CONVERSE: &str = "converse";

// --- Provider name values ---

pub const PROVIDER_GEMINI: &str = "gemini";
pub const PROVIDER_CANNED: &str = "canned";
