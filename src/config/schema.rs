use serde_json::{json, Value};
use std::sync::LazyLock;

pub static CONFIG_SCHEMA: LazyLock<Value> = LazyLock::new(|| {
    json!({
        "$schema": "http://json-schema.org/draft-07/schema#",
        "type": "object",
        "additionalProperties": false,
        "properties": {
            "versions": {
                "type": "array",
                "minItems": 1,
                "items": { "type": "string" }
            },
            "project_dir": { "type": "string" },
            "work_dir": { "type": "string" },
            "env_prefix": { "type": "string", "minLength": 1 },
            "interpreter": { "type": "string", "minLength": 1 },
            "checks": {
                "type": "object",
                "additionalProperties": false,
                "properties": {
                    "config": { "type": "string" },
                    "hooks": { "type": "array", "items": { "type": "string" } },
                    "extra_packages": { "type": "array", "items": { "type": "string" } }
                }
            },
            "step_timeout_secs": { "type": "integer", "minimum": 0 },
            "fail_fast": { "type": "boolean" }
        }
    })
});
