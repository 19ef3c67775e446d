#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Tool(#[from] devkit_core::Error),

    #[error("No input provided. Pass it as an argument, with --file, or through stdin")]
    NoInput,

    #[error("Expected text input but {0} contains binary data")]
    BinaryInput(String),
}
