//! Path templating collaborator

use crate::context::TaskContext;
use crate::{Error, Result};
use regex::{Captures, Regex};
use serde_json::Value;
use std::sync::LazyLock;

/// Renders a path expression against the task context.
///
/// The orchestration engine supplies its own implementation; [`VarTemplater`]
/// covers plain variable substitution.
pub trait Templater: Send + Sync {
    fn render(&self, expr: &str, context: &TaskContext) -> Result<String>;
}

static VARIABLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{\{\s*([A-Za-z_][A-Za-z0-9_]*)\s*\}\}").expect("variable pattern is valid")
});

/// Substitutes `{{ name }}` placeholders with task variables.
///
/// String values are inserted verbatim, other JSON values in their compact
/// JSON form. An unknown variable is an error rather than an empty string,
/// so a typo never silently points at another file.
#[derive(Debug, Default, Clone, Copy)]
pub struct VarTemplater;

impl VarTemplater {
    pub fn new() -> Self {
        Self
    }
}

impl Templater for VarTemplater {
    fn render(&self, expr: &str, context: &TaskContext) -> Result<String> {
        let mut missing = None;
        let rendered = VARIABLE.replace_all(expr, |caps: &Captures<'_>| {
            let name = &caps[1];
            match context.var(name) {
                Some(Value::String(s)) => s.clone(),
                Some(other) => other.to_string(),
                None => {
                    missing.get_or_insert_with(|| name.to_string());
                    String::new()
                }
            }
        });

        match missing {
            Some(name) => Err(Error::Template {
                expr: expr.to_string(),
                message: format!("undefined variable '{name}'"),
            }),
            None => Ok(rendered.into_owned()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn substitutes_string_variables() {
        let context = TaskContext::new().with_var("role", "web");
        let rendered = VarTemplater.render("files/{{ role }}/app.conf", &context).unwrap();
        assert_eq!(rendered, "files/web/app.conf");
    }

    #[test]
    fn substitutes_non_string_variables() {
        let context = TaskContext::new().with_var("port", 8080);
        let rendered = VarTemplater.render("conf/{{port}}.conf", &context).unwrap();
        assert_eq!(rendered, "conf/8080.conf");
    }

    #[test]
    fn leaves_plain_paths_untouched() {
        let rendered = VarTemplater.render("/etc/motd", &TaskContext::new()).unwrap();
        assert_eq!(rendered, "/etc/motd");
    }

    #[test]
    fn undefined_variable_is_an_error() {
        let err = VarTemplater
            .render("files/{{ hostname }}.conf", &TaskContext::new())
            .unwrap_err();
        assert!(err.to_string().contains("hostname"), "got: {err}");
    }
}
