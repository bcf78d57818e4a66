use futures::future::LocalBoxFuture;
use std::future::Future;
use std::rc::Rc;

/// Result of asking a validator about a value.
///
/// `Immediate` carries the error message directly (an empty string means the
/// value is valid). `Deferred` carries a future that resolves to `Ok(())` when
/// the value is valid, or to an error whose message is shown to the user.
pub enum Validation {
    Immediate(String),
    Deferred(LocalBoxFuture<'static, anyhow::Result<()>>),
}

impl Validation {
    pub fn immediate(message: impl Into<String>) -> Self {
        Validation::Immediate(message.into())
    }

    pub fn valid() -> Self {
        Validation::Immediate(String::new())
    }

    pub fn deferred(fut: impl Future<Output = anyhow::Result<()>> + 'static) -> Self {
        Validation::Deferred(Box::pin(fut))
    }
}

impl From<String> for Validation {
    fn from(message: String) -> Self {
        Validation::Immediate(message)
    }
}

impl From<&str> for Validation {
    fn from(message: &str) -> Self {
        Validation::Immediate(message.to_string())
    }
}

/// Turns a settled deferred validation into the message to display.
pub fn error_message(result: anyhow::Result<()>) -> String {
    match result {
        Ok(()) => String::new(),
        Err(err) => err.to_string(),
    }
}

pub type Validator = Rc<dyn Fn(&str) -> Validation>;
pub type ChangeHandler = Rc<dyn Fn(&str)>;
