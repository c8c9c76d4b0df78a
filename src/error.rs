use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TemplateError {
    #[error("template is missing placeholder {0}")]
    MissingPlaceholder(&'static str),
}

#[derive(Debug, Error, PartialEq)]
pub enum RenderError {
    #[error("{shape} coordinate {index} is not finite ({value})")]
    NonFinite {
        shape: &'static str,
        index: usize,
        value: f64,
    },
}
