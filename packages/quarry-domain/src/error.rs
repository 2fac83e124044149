pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Scope {scope} requires an owner tag.")]
	MissingOwnerTag { scope: crate::scope::Scope },
	#[error("Unknown scope {value:?}.")]
	UnknownScope { value: String },
	#[error("Unknown search mode {value:?}.")]
	UnknownSearchMode { value: String },
}
