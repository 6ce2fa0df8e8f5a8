mod rewrite_query;

pub use rewrite_query::RewriteHandler;
