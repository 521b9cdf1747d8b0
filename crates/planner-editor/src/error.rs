use thiserror::Error;

use planner_core::CatalogError;
use planner_io::CodecError;

#[derive(Error, Debug)]
pub enum EditorError {
    #[error(transparent)]
    Codec(#[from] CodecError),

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error("No file has been chosen to save the layout to")]
    NoFilePath,
}
