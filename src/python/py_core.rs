//! Core type bindings for Python.

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

use crate::core::{ConfigError, MoveError, PlayerId, Position};

/// Python wrapper for PlayerId.
#[pyclass(name = "PlayerId")]
#[derive(Clone, Debug)]
pub struct PyPlayerId(pub PlayerId);

#[pymethods]
impl PyPlayerId {
    /// Create a new player ID.
    #[new]
    fn new(id: u8) -> Self {
        Self(PlayerId::new(id))
    }

    /// Get the player index (0-based).
    fn index(&self) -> usize {
        self.0.index()
    }

    /// Get the raw ID value.
    #[getter]
    fn id(&self) -> u8 {
        self.0 .0
    }

    fn __repr__(&self) -> String {
        format!("PlayerId({})", self.0 .0)
    }

    fn __eq__(&self, other: &Self) -> bool {
        self.0 == other.0
    }

    fn __hash__(&self) -> u64 {
        self.0 .0 as u64
    }
}

/// Python wrapper for Position.
#[pyclass(name = "Position")]
#[derive(Clone, Debug)]
pub struct PyPosition(pub Position);

#[pymethods]
impl PyPosition {
    #[new]
    fn new(row: usize, col: usize) -> Self {
        Self(Position::new(row, col))
    }

    #[getter]
    fn row(&self) -> usize {
        self.0.row
    }

    #[getter]
    fn col(&self) -> usize {
        self.0.col
    }

    /// Orb threshold of this cell.
    fn critical_mass(&self) -> u32 {
        self.0.critical_mass()
    }

    fn __repr__(&self) -> String {
        format!("Position({}, {})", self.0.row, self.0.col)
    }

    fn __eq__(&self, other: &Self) -> bool {
        self.0 == other.0
    }

    fn __hash__(&self) -> u64 {
        self.0.index() as u64
    }
}

pub(crate) fn move_error(err: MoveError) -> PyErr {
    PyValueError::new_err(err.to_string())
}

pub(crate) fn config_error(err: ConfigError) -> PyErr {
    PyValueError::new_err(err.to_string())
}
