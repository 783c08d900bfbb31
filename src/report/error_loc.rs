use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::token::{Loc, Token};

/// This trait lets the error reporting functions accept a variety of things as the error locator.
pub trait ErrorLoc {
    fn loc_length(&self) -> usize {
        0
    }
    fn into_loc(self) -> Loc;
}

impl ErrorLoc for Loc {
    fn into_loc(self) -> Loc {
        self
    }
}

impl ErrorLoc for &Loc {
    fn into_loc(self) -> Loc {
        self.clone()
    }
}

impl ErrorLoc for Token {
    fn loc_length(&self) -> usize {
        self.as_str().chars().count()
    }

    fn into_loc(self) -> Loc {
        self.loc
    }
}

impl ErrorLoc for &Token {
    fn loc_length(&self) -> usize {
        self.as_str().chars().count()
    }

    fn into_loc(self) -> Loc {
        self.loc.clone()
    }
}

/// A path points at a file as a whole.
impl ErrorLoc for &Path {
    fn into_loc(self) -> Loc {
        Loc::for_file(Arc::new(self.to_path_buf()))
    }
}

impl ErrorLoc for &PathBuf {
    fn into_loc(self) -> Loc {
        Loc::for_file(Arc::new(self.clone()))
    }
}

impl ErrorLoc for &Arc<PathBuf> {
    fn into_loc(self) -> Loc {
        Loc::for_file(Arc::clone(self))
    }
}
