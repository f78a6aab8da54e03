//! MiniJinja-backed template engine.

use std::io::Write;

use minijinja::{AutoEscape, Environment, UndefinedBehavior, Value, syntax::SyntaxConfig};
use tracing::trace;

use treeplate_core::{
    application::ports::TemplateEngine,
    domain::{CompiledTemplate, Delimiters},
    error::{TreeplateError, TreeplateResult},
};

/// Template engine using MiniJinja syntax.
///
/// Every template gets its own environment, so two templates never see each
/// other and a custom delimiter pair applies to exactly one compile.
///
/// A custom pair `L`/`R` replaces all of the default syntax: expressions are
/// `L ... R`, blocks `L% ... %R` and comments `L# ... #R`. A plain `{% %}`
/// or `{# #}` in such a template is ordinary text.
///
/// Environment settings:
/// - undefined values are errors, not empty strings
/// - no HTML auto-escaping, whatever the file suffix
/// - a trailing newline in the source is kept in the output
///
/// # Example
///
/// ```rust
/// use treeplate_adapters::MiniJinjaEngine;
/// use treeplate_core::application::ports::TemplateEngine;
/// use treeplate_core::domain::ParsedTemplate;
///
/// let engine = MiniJinjaEngine::new();
/// let body = engine
///     .compile("hello.tmpl", "Hello {{ Name }}".into(), None)
///     .unwrap();
/// let template = ParsedTemplate::new("hello.tmpl", body);
///
/// let out = template
///     .render(&serde_json::json!({ "Name": "Frank" }))
///     .unwrap();
/// assert_eq!(out, "Hello Frank");
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct MiniJinjaEngine;

impl MiniJinjaEngine {
    pub fn new() -> Self {
        Self
    }

    fn environment(
        name: &str,
        delimiters: Option<&Delimiters>,
    ) -> TreeplateResult<Environment<'static>> {
        let mut env = Environment::new();
        env.set_undefined_behavior(UndefinedBehavior::Strict);
        env.set_auto_escape_callback(|_| AutoEscape::None);
        env.set_keep_trailing_newline(true);

        if let Some(delims) = delimiters {
            let (left, right) = (delims.left(), delims.right());
            let syntax = SyntaxConfig::builder()
                .variable_delimiters(left.to_string(), right.to_string())
                .block_delimiters(format!("{left}%"), format!("%{right}"))
                .comment_delimiters(format!("{left}#"), format!("#{right}"))
                .build()
                .map_err(|e| TreeplateError::Syntax {
                    name: name.to_string(),
                    reason: format!("unusable delimiters '{left}' '{right}': {e}"),
                })?;
            env.set_syntax(syntax);
        }

        Ok(env)
    }
}

impl TemplateEngine for MiniJinjaEngine {
    fn compile(
        &self,
        name: &str,
        source: String,
        delimiters: Option<&Delimiters>,
    ) -> TreeplateResult<Box<dyn CompiledTemplate>> {
        let mut env = Self::environment(name, delimiters)?;
        env.add_template_owned(name.to_string(), source)
            .map_err(|e| TreeplateError::Syntax {
                name: name.to_string(),
                reason: e.to_string(),
            })?;

        trace!(name, custom_delimiters = delimiters.is_some(), "compiled");
        Ok(Box::new(MiniJinjaTemplate {
            name: name.to_string(),
            env,
        }))
    }
}

/// One compiled template and the environment that owns it.
pub struct MiniJinjaTemplate {
    name: String,
    env: Environment<'static>,
}

impl MiniJinjaTemplate {
    fn execution_error(&self, e: minijinja::Error) -> TreeplateError {
        TreeplateError::Execution {
            name: self.name.clone(),
            reason: e.to_string(),
        }
    }
}

impl CompiledTemplate for MiniJinjaTemplate {
    fn execute(&self, data: &serde_json::Value, out: &mut dyn Write) -> TreeplateResult<()> {
        let template = self
            .env
            .get_template(&self.name)
            .map_err(|e| self.execution_error(e))?;
        template
            .render_to_write(Value::from_serialize(data), out)
            .map_err(|e| self.execution_error(e))?;
        Ok(())
    }
}
