use crate::error::{ChatError, Result};

pub const DEFAULT_MODEL_LABEL: &str = "DeepSeek V3.1 Free";

/// Human-readable labels and the OpenRouter model ids they stand for.
pub const MODELS: &[(&str, &str)] = &[
    ("DeepSeek V3.1 Free", "nex-agi/deepseek-v3.1-nex-n1:free"),
    ("Mistral Devstral 2 (Coding)", "mistralai/devstral-2512:free"),
    ("KAT Coder Pro (Agentic Coding)", "kwaipilot/kat-coder-pro:free"),
    ("DeepSeek R1T2 Chimera", "tngtech/deepseek-r1t2-chimera:free"),
    ("Olmo 32B Think", "allenai/olmo-3.1-32b-think:free"),
    ("GLM 4.5 Air", "z-ai/glm-4.5-air:free"),
    ("Gemma 3 4B Vision", "google/gemma-3-4b-it:free"),
    ("Gemma 3 27B Vision", "google/gemma-3-27b-it:free"),
    ("Amazon Nova 2 Lite (Video)", "amazon/nova-2-lite-v1:free"),
    ("NVIDIA Nemotron VL (Video)", "nvidia/nemotron-nano-12b-v2-vl:free"),
    ("LLaMA 3.3 70B", "meta-llama/llama-3.3-70b-instruct:free"),
    ("GPT-OSS 20B", "openai/gpt-oss-20b:free"),
    ("Qwen3 Coder", "qwen/qwen3-coder:free"),
];

pub fn lookup(label: &str) -> Option<&'static str> {
    MODELS
        .iter()
        .find(|(l, _)| l.eq_ignore_ascii_case(label))
        .map(|(_, id)| *id)
}

pub fn labels() -> impl Iterator<Item = &'static str> {
    MODELS.iter().map(|(label, _)| *label)
}

/// Accepts either a label or one of the known model ids.
pub fn resolve(label_or_id: &str) -> Result<&'static str> {
    let wanted = label_or_id.trim();
    lookup(wanted)
        .or_else(|| MODELS.iter().find(|(_, id)| *id == wanted).map(|(_, id)| *id))
        .ok_or_else(|| {
            ChatError::ConfigError(format!(
                "Unknown model '{}'. Available: {}",
                wanted,
                labels().collect::<Vec<_>>().join(", ")
            ))
        })
}
