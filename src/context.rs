//! Context stack.
//!
//! Disambiguates tokens whose meaning depends on where the lexer sits in
//! the grammar: `{` as a block vs. an object literal, `` ` `` opening vs.
//! closing a template, and whether a bare regex or a division operator is
//! expected after `/`.

/// One entry on the context stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokContext {
    pub label: &'static str,
    /// True if a `{`/`(` in this context opens an *expression* (so `/`
    /// that follows should be read as a regex, not division).
    pub is_expr: bool,
    /// True if line breaks/comments inside this context should be kept
    /// verbatim rather than treated as insignificant whitespace
    /// (template contexts).
    pub preserve_space: bool,
    /// True for contexts introduced by a `function` keyword, used by
    /// the close-brace updater to tell a function body apart from a
    /// plain block.
    pub is_function: bool,
}

pub const B_STAT: TokContext = TokContext { label: "{ statement", is_expr: false, preserve_space: false, is_function: false };
pub const B_EXPR: TokContext = TokContext { label: "{ expression", is_expr: true, preserve_space: false, is_function: false };
pub const B_TMPL: TokContext = TokContext { label: "${ tmpl", is_expr: false, preserve_space: true, is_function: false };
pub const P_STAT: TokContext = TokContext { label: "( statement", is_expr: false, preserve_space: false, is_function: false };
pub const P_EXPR: TokContext = TokContext { label: "( expression", is_expr: true, preserve_space: false, is_function: false };
pub const Q_TMPL: TokContext = TokContext { label: "` template", is_expr: true, preserve_space: true, is_function: false };
pub const FUNC_EXPR: TokContext = TokContext { label: "function", is_expr: true, preserve_space: false, is_function: true };
pub const FUNC_STAT: TokContext = TokContext { label: "function", is_expr: false, preserve_space: false, is_function: true };

/// JSX plug-in contexts: an open tag, the region between
/// `>`/`/` and `<` inside element children, and a closing tag.
pub const J_OTAG: TokContext = TokContext { label: "<tag", is_expr: false, preserve_space: false, is_function: false };
pub const J_CTAG: TokContext = TokContext { label: "</tag", is_expr: false, preserve_space: false, is_function: false };
pub const J_EXPR: TokContext = TokContext { label: "<tag>...</tag>", is_expr: true, preserve_space: true, is_function: false };

/// A growable stack of [`TokContext`] frames, mutated by the lexer as it
/// crosses brace/paren/backtick boundaries.
#[derive(Debug, Clone)]
pub struct ContextStack {
    frames: Vec<TokContext>,
}

impl ContextStack {
    pub fn new() -> Self {
        Self { frames: vec![B_STAT] }
    }

    pub fn current(&self) -> TokContext {
        *self.frames.last().expect("context stack is never empty")
    }

    pub fn push(&mut self, ctx: TokContext) {
        log::trace!("context push {} (depth {})", ctx.label, self.frames.len() + 1);
        self.frames.push(ctx);
    }

    pub fn pop(&mut self) -> Option<TokContext> {
        if self.frames.len() > 1 {
            let popped = self.frames.pop();
            log::trace!("context pop -> {} (depth {})", self.current().label, self.frames.len());
            popped
        } else {
            None
        }
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        false // the base B_STAT frame is never popped
    }

    /// `}` pops a brace context, telling the caller whether it closed a
    /// template substitution (so the lexer should resume reading the
    /// template's string part rather than a normal token). If the brace
    /// just closed was a function body, the `function`/`f_expr` or
    /// `f_stat` context underneath it is uncovered and has no matching
    /// closing token of its own (it was pushed at the `function` keyword,
    /// not at `{`), so it's popped here too and handed back to the
    /// caller to resolve `expr_allowed` from its `is_expr`.
    pub fn update_brace_r(&mut self) -> (bool, Option<TokContext>) {
        let closed_tmpl = self.current() == B_TMPL;
        self.pop();
        let closed_function = if self.current().is_function {
            let ctx = self.current();
            self.pop();
            Some(ctx)
        } else {
            None
        };
        (closed_tmpl, closed_function)
    }

    /// `{` pushes either a block or an object-literal context depending
    /// on whether the preceding token allows an expression here.
    pub fn update_brace_l(&mut self, next_expr_allowed: bool) {
        self.push(if next_expr_allowed { B_EXPR } else { B_STAT });
    }

    /// Backtick toggles: open a template, or close one and resume the
    /// enclosing context.
    pub fn update_back_quote(&mut self) {
        if self.current() == Q_TMPL {
            self.pop();
        } else {
            self.push(Q_TMPL);
        }
    }

    /// `function` pushes a function context; whether it reads as an
    /// expression depends on the current context (statement position
    /// starts a declaration, expression position starts an expression).
    pub fn update_function(&mut self) {
        let ctx = if self.current().is_expr { FUNC_EXPR } else { FUNC_STAT };
        self.push(ctx);
    }

    pub fn update_paren_l(&mut self, next_expr_allowed: bool) {
        self.push(if next_expr_allowed { P_EXPR } else { P_STAT });
    }

    pub fn update_paren_r(&mut self) {
        self.pop();
    }

    pub fn update_dollar_brace_l(&mut self) {
        self.push(B_TMPL);
    }
}

impl Default for ContextStack {
    fn default() -> Self {
        Self::new()
    }
}
