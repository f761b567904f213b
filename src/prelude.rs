pub type Result<T> = std::result::Result<T, standard_error::StandardError>;
