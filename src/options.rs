//! Parser configuration.
//!
//! Grounded on `oxc_parser`'s chainable `ParserReturn`/options-builder
//! convention: a plain struct with `Default` plus `with_*` setters that
//! take `self` by value and return it, so callers can chain
//! `Options::default().with_source_type(...)`.

use crate::ast::SourceType;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialectPlugin {
    Jsx,
    Flow,
    TypeScript,
    Estree,
    Decorators,
    Decorators2,
}

#[derive(Debug, Clone)]
pub struct Options {
    pub source_type: SourceType,
    pub source_filename: Option<String>,
    pub start_line: usize,
    pub allow_return_outside_function: bool,
    pub allow_import_export_everywhere: bool,
    pub allow_super_outside_method: bool,
    pub allow_undeclared_exports: bool,
    pub plugins: Vec<DialectPlugin>,
    pub strict_mode: Option<bool>,
    pub ranges: bool,
    pub tokens: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            source_type: SourceType::Script,
            source_filename: None,
            start_line: 1,
            allow_return_outside_function: false,
            allow_import_export_everywhere: false,
            allow_super_outside_method: false,
            allow_undeclared_exports: false,
            plugins: Vec::new(),
            strict_mode: None,
            ranges: false,
            tokens: false,
        }
    }
}

impl Options {
    pub fn with_source_type(mut self, source_type: SourceType) -> Self {
        self.source_type = source_type;
        self
    }

    pub fn with_source_filename(mut self, name: impl Into<String>) -> Self {
        self.source_filename = Some(name.into());
        self
    }

    pub fn with_start_line(mut self, line: usize) -> Self {
        self.start_line = line;
        self
    }

    pub fn with_allow_return_outside_function(mut self, allow: bool) -> Self {
        self.allow_return_outside_function = allow;
        self
    }

    pub fn with_allow_import_export_everywhere(mut self, allow: bool) -> Self {
        self.allow_import_export_everywhere = allow;
        self
    }

    pub fn with_allow_super_outside_method(mut self, allow: bool) -> Self {
        self.allow_super_outside_method = allow;
        self
    }

    pub fn with_plugin(mut self, plugin: DialectPlugin) -> Self {
        self.plugins.push(plugin);
        self
    }

    pub fn with_strict_mode(mut self, strict: bool) -> Self {
        self.strict_mode = Some(strict);
        self
    }

    pub fn with_ranges(mut self, ranges: bool) -> Self {
        self.ranges = ranges;
        self
    }

    pub fn with_tokens(mut self, tokens: bool) -> Self {
        self.tokens = tokens;
        self
    }

    pub fn has_plugin(&self, plugin: DialectPlugin) -> bool {
        self.plugins.contains(&plugin)
    }

    /// Validates mutually-exclusive dialect combinations: Flow and
    /// TypeScript can't both be active, nor can the two decorator
    /// proposals.
    pub fn validate_plugins(&self) -> Result<(), String> {
        if self.has_plugin(DialectPlugin::Flow) && self.has_plugin(DialectPlugin::TypeScript) {
            return Err("cannot combine flow and typescript plugins".into());
        }
        if self.has_plugin(DialectPlugin::Decorators) && self.has_plugin(DialectPlugin::Decorators2) {
            return Err("cannot combine decorators and decorators2 plugins".into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_chains() {
        let opts = Options::default()
            .with_source_type(SourceType::Module)
            .with_plugin(DialectPlugin::Jsx)
            .with_ranges(true);
        assert_eq!(opts.source_type, SourceType::Module);
        assert!(opts.has_plugin(DialectPlugin::Jsx));
        assert!(opts.ranges);
    }

    #[test]
    fn flow_and_typescript_are_mutually_exclusive() {
        let opts = Options::default()
            .with_plugin(DialectPlugin::Flow)
            .with_plugin(DialectPlugin::TypeScript);
        assert!(opts.validate_plugins().is_err());
    }

    #[test]
    fn decorators_variants_are_mutually_exclusive() {
        let opts = Options::default()
            .with_plugin(DialectPlugin::Decorators)
            .with_plugin(DialectPlugin::Decorators2);
        assert!(opts.validate_plugins().is_err());
    }
}
