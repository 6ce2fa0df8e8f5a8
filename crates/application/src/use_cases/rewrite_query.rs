use async_trait::async_trait;
use rewriteng_domain::validators::is_valid_name;
use rewriteng_domain::{DnsMessage, DomainError, ResponseCode};
use std::sync::Arc;
use tracing::{debug, error};

use crate::ports::{DnsHandler, ResponseWriter};
use crate::services::{CompoundRule, ResponseRewriter, RewriteResult};

/// Rewrites the question of matching requests before passing them on, and
/// rewrites the response on its way back.
///
/// Rules are tried in order; the first one that fires wins.
pub struct RewriteHandler {
    rules: Arc<[CompoundRule]>,
    next: Option<Arc<dyn DnsHandler>>,
}

impl RewriteHandler {
    pub const NAME: &'static str = "rewriteng";

    pub fn new(rules: impl Into<Arc<[CompoundRule]>>) -> Self {
        Self {
            rules: rules.into(),
            next: None,
        }
    }

    pub fn with_next(mut self, next: Arc<dyn DnsHandler>) -> Self {
        self.next = Some(next);
        self
    }

    pub fn rules(&self) -> &[CompoundRule] {
        &self.rules
    }

    fn next(&self) -> Result<&Arc<dyn DnsHandler>, DomainError> {
        self.next
            .as_ref()
            .ok_or(DomainError::NoNextHandler(Self::NAME))
    }
}

#[async_trait]
impl DnsHandler for RewriteHandler {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    async fn serve_dns(
        &self,
        writer: &mut dyn ResponseWriter,
        mut request: DnsMessage,
    ) -> Result<ResponseCode, DomainError> {
        let next = self.next()?;

        let Some(original_question) = request.question().cloned() else {
            return next.serve_dns(writer, request).await;
        };
        let recursion_desired = request.recursion_desired;

        for rule in self.rules.iter() {
            if rule.rewrite_question(&mut request) == RewriteResult::Ignored {
                continue;
            }

            let rewritten = request
                .question()
                .map(|q| q.name.clone())
                .unwrap_or_default();

            // The caller answers SERVFAIL from its own copy of the request,
            // which still carries the original question.
            if !is_valid_name(&rewritten) {
                error!(
                    name = %rewritten,
                    original = %original_question.name,
                    "Invalid name after rewrite"
                );
                return Err(DomainError::InvalidRewrittenName(rewritten));
            }

            debug!(
                from = %original_question.name,
                to = %rewritten,
                "Question rewritten, calling next handler: {}",
                next.name()
            );

            let mut rewriter =
                ResponseRewriter::new(&mut *writer, original_question, recursion_desired)
                    .with_rule(rule);
            return next.serve_dns(&mut rewriter, request).await;
        }

        next.serve_dns(writer, request).await
    }
}
