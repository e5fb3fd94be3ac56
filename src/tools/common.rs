use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use super::workspace::Workspace;

#[derive(Debug, Clone)]
pub enum ParamType {
    String,
    Boolean,
    Object,
}

impl ParamType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ParamType::String => "string",
            ParamType::Boolean => "boolean",
            ParamType::Object => "object",
        }
    }
}

#[derive(Clone)]
pub struct Param {
    pub name: &'static str,
    pub desc: &'static str,
    pub param_type: ParamType,
    pub required: bool,
}

/// Every tool answers with text; the error side is text meant for the caller as well.
pub type ToolResult = Result<String, String>;

pub type ToolFuture = Pin<Box<dyn Future<Output = ToolResult> + Send>>;

/// Anything that can be called with a `serde_json::Value` payload against a workspace.
pub type AsyncFn = Box<dyn Fn(serde_json::Value, Arc<dyn Workspace>) -> ToolFuture + Send + Sync>;

/// Adapt a typed async handler to a uniform `Fn(Value, Workspace) -> Future<ToolResult>`.
/// That keeps strongly-typed ergonomics at the edges; the closure is `Arc`-cloned for reuse.
///
/// ```rust,ignore
/// #[derive(serde::Deserialize)]
/// struct Hello { name: String }
///
/// async fn hello(args: Hello, _ws: Arc<dyn Workspace>) -> ToolResult {
///     Ok(format!("hi {}", args.name))
/// }
///
/// let wrapped = with_args(hello);
/// let out = wrapped(serde_json::json!({ "name": "Ada" }), workspace.clone()).await;
/// assert_eq!(out, Ok("hi Ada".to_string()));
///
/// // Invalid inputs yield a normalized error
/// let err = wrapped(serde_json::json!({ "name": 123 }), workspace).await;
/// assert!(err.unwrap_err().starts_with("Wrong attributes passed"));
/// ```
pub fn with_args<Args, Fut, F>(f: F) -> AsyncFn
where
    Args: serde::de::DeserializeOwned + Send + 'static,
    F: Fn(Args, Arc<dyn Workspace>) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = ToolResult> + Send + 'static,
{
    let f = Arc::new(f);
    Box::new(move |args: serde_json::Value, workspace: Arc<dyn Workspace>| -> ToolFuture {
        // Derived struct decoding also takes arrays by position; only objects are arguments.
        let args = if args.is_object() {
            serde_json::from_value::<Args>(args).map_err(|e| e.to_string())
        } else {
            Err(format!("expected a JSON object, got {args}"))
        };
        let args = match args {
            Ok(args) => args,
            Err(error) => {
                return Box::pin(async move { Err(format!("Wrong attributes passed: {error}")) });
            }
        };
        let f = Arc::clone(&f);
        Box::pin(async move { (f)(args, workspace).await })
    })
}

/// Cap a response at `limit` characters, saying how long it really was.
pub fn truncate_response(text: &str, limit: usize) -> String {
    let length = text.chars().count();
    if length <= limit {
        return text.to_string();
    }
    let mut out: String = text.chars().take(limit).collect();
    out.push_str(&format!("…[truncated] response is too long: {length}"));
    out
}

/// Wrap text as the `{"content": ...}` object the read/list tools answer with.
pub fn content_response(text: &str, limit: usize) -> String {
    serde_json::json!({ "content": truncate_response(text, limit) }).to_string()
}
