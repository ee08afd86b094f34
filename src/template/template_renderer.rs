use log::error;
use minijinja::{AutoEscape, Environment, Error as JinjaError, ErrorKind, Value};
use once_cell::sync::Lazy;
use serde::Serialize;

/// Templates compiled into the binary, keyed by name.
const EMBEDDED_TEMPLATES: [(&str, &str); 4] = [
    ("clash.yaml", include_str!("../../templates/clash.yaml")),
    ("loon.conf", include_str!("../../templates/loon.conf")),
    ("surfboard.conf", include_str!("../../templates/surfboard.conf")),
    ("quantumultx.conf", include_str!("../../templates/quantumultx.conf")),
];

/// Base document the sing-box renderer merges its outbounds into.
pub const SINGBOX_BASE: &str = include_str!("../../templates/singbox.json");

/// Shared template environment. Only holds compiled templates, so it is
/// never mutated after start-up.
static TEMPLATE_ENV: Lazy<Environment<'static>> = Lazy::new(|| {
    let mut env = Environment::new();

    // Configs are not HTML
    env.set_auto_escape_callback(|_| AutoEscape::None);
    env.set_keep_trailing_newline(true);
    env.add_filter("toYaml", filter_to_yaml);

    for (name, source) in EMBEDDED_TEMPLATES {
        if let Err(e) = env.add_template(name, source) {
            error!("Failed to compile template {}: {}", name, e);
        }
    }
    env
});

/// Render the embedded template `name` with `context`.
pub fn render_template<S: Serialize>(name: &str, context: S) -> Result<String, JinjaError> {
    let template = TEMPLATE_ENV.get_template(name)?;
    template.render(context).map_err(|e| {
        error!("Template {} render failed! Reason: {}", name, e);
        e
    })
}

/// Serialize a value as block YAML, indenting every line by `indent` spaces.
fn filter_to_yaml(value: Value, indent: Option<usize>) -> Result<String, JinjaError> {
    let yaml = serde_yaml::to_string(&value).map_err(|e| {
        JinjaError::new(
            ErrorKind::InvalidOperation,
            format!("YAML serialization error: {}", e),
        )
    })?;
    let pad = " ".repeat(indent.unwrap_or(0));
    Ok(yaml
        .trim_end()
        .lines()
        .map(|line| format!("{}{}", pad, line))
        .collect::<Vec<_>>()
        .join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use minijinja::context;

    #[test]
    fn test_embedded_templates_compile() {
        for (name, _) in EMBEDDED_TEMPLATES {
            assert!(TEMPLATE_ENV.get_template(name).is_ok(), "{}", name);
        }
    }

    #[test]
    fn test_to_yaml_indents_lines() {
        let value = Value::from_serialize(vec![context! { name => "A", port => 443 }]);
        let yaml = filter_to_yaml(value, Some(2)).unwrap();
        assert_eq!(yaml, "  - name: A\n    port: 443");
    }

    #[test]
    fn test_unknown_template() {
        assert!(render_template("missing.conf", context! {}).is_err());
    }
}
