//! `Engine`: the concurrent compiled-rule cache plus the hot evaluate path
//! (spec §4.5, §5, §6).

use std::sync::Arc;

use dashmap::DashMap;
use ruleq_eval::{Context, Evaluator};
use ruleq_par::CompiledRule;
use ruleq_util::CompileResult;

/// Compiles and caches query text, then evaluates it against a [`Context`].
///
/// Safe for concurrent use by many threads: the cache is a [`DashMap`], not
/// a single global mutex, so lookups and evaluations on distinct (or even
/// the same) keys never serialise against each other. On a simultaneous
/// cache miss for the same query text, both callers may compile in
/// parallel; compilation is deterministic, so whichever insert wins is
/// value-equivalent to the one that lost, and the discarded tree is simply
/// dropped.
pub struct Engine {
    cache: DashMap<String, Arc<CompiledRule>>,
    evaluator: Evaluator,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine {
    /// `NewEngine() -> Engine` (spec §6).
    pub fn new() -> Self {
        Self {
            cache: DashMap::new(),
            evaluator: Evaluator::new(),
        }
    }

    /// `Engine.CompileRule(text) -> (CompiledRule, optional error)` (spec
    /// §6). Does not touch the cache — callers that want caching go
    /// through [`Engine::add_query`] or [`Engine::evaluate`].
    pub fn compile_rule(&self, text: &str) -> CompileResult<CompiledRule> {
        let ast = ruleq_par::parse(text)?;
        ruleq_sem::validate(&ast)?;
        Ok(CompiledRule::new(ast, text))
    }

    /// `Engine.AddQuery(text) -> optional error` (spec §4.5, §6).
    /// Compiles and caches; idempotent per text — a second call with the
    /// same text is a cache hit and re-validates nothing.
    pub fn add_query(&self, text: &str) -> CompileResult<()> {
        if self.cache.contains_key(text) {
            return Ok(());
        }
        let rule = self.compile_rule(text)?;
        self.cache.insert(text.to_string(), Arc::new(rule));
        Ok(())
    }

    /// `Engine.Evaluate(text, context) -> (boolean, optional error)` (spec
    /// §4.5, §6). One cache read; on hit, evaluates directly with no
    /// further allocation. On miss, compiles, inserts, then evaluates.
    pub fn evaluate(&self, text: &str, ctx: &Context) -> CompileResult<bool> {
        if let Some(rule) = self.cache.get(text) {
            return Ok(self.evaluator.evaluate(&rule.root, ctx));
        }
        let rule = Arc::new(self.compile_rule(text)?);
        self.cache.insert(text.to_string(), Arc::clone(&rule));
        Ok(self.evaluator.evaluate(&rule.root, ctx))
    }

    /// `Engine.EvaluateCompiled(rule, context) -> (boolean, optional error)`
    /// (spec §6). Handle-based evaluation, skips the cache lookup entirely —
    /// the only fallible step (compilation) already happened.
    pub fn evaluate_compiled(&self, rule: &CompiledRule, ctx: &Context) -> bool {
        self.evaluator.evaluate(&rule.root, ctx)
    }

    /// `Engine.ClearCache()` (spec §4.5, §6).
    pub fn clear_cache(&self) {
        self.cache.clear();
    }

    /// Number of distinct query strings currently cached. Not part of the
    /// spec's programmatic API; useful for tests and diagnostics.
    pub fn cache_len(&self) -> usize {
        self.cache.len()
    }
}
