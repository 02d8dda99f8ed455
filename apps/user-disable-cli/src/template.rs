use serde_json::Value;
use user_disable_sdk::{TemplateError, TemplateResolver};

/// Replaces `{{ a.b.c }}` placeholders with string or number values from the job data.
pub struct JobDataResolver;

impl TemplateResolver for JobDataResolver {
    fn resolve(&self, value: &str, data: &Value) -> Result<String, TemplateError> {
        let mut out = String::with_capacity(value.len());
        let mut rest = value;

        while let Some(start) = rest.find("{{") {
            out.push_str(&rest[..start]);
            let after = &rest[start + 2..];
            let end = after
                .find("}}")
                .ok_or_else(|| TemplateError::Malformed(value.to_owned()))?;
            let path = after[..end].trim();
            out.push_str(&lookup(data, path)?);
            rest = &after[end + 2..];
        }

        out.push_str(rest);
        Ok(out)
    }
}

fn lookup(data: &Value, path: &str) -> Result<String, TemplateError> {
    let found = path
        .split('.')
        .try_fold(data, |node, segment| node.get(segment));
    match found {
        Some(Value::String(s)) => Ok(s.clone()),
        Some(Value::Number(n)) => Ok(n.to_string()),
        _ => Err(TemplateError::Unresolved(path.to_owned())),
    }
}
