//! Python bindings. Any Python object can be stored; the ring only holds a
//! reference to it.
//!
//! Built with `--features python` the cdylib is an importable `handle_ring`
//! extension module. `extension-module` leaves libpython unlinked, so nothing in
//! here runs under `cargo test`; the ring itself is covered by its own tests.
use pyo3::exceptions::{PyMemoryError, PyValueError};
use pyo3::prelude::*;

use crate::errors::Error;
use crate::ring_buffer::RingBuffer;

impl From<Error> for PyErr {
    fn from(err: Error) -> PyErr {
        match err {
            Error::OutOfResource(_) => PyMemoryError::new_err(err.to_string()),
            _ => PyValueError::new_err(err.to_string()),
        }
    }
}

#[pyclass]
pub struct HandleRing {
    inner: RingBuffer<PyObject>,
}

#[pymethods]
impl HandleRing {
    #[new]
    fn new(capacity: i64) -> PyResult<Self> {
        Ok(Self {
            inner: RingBuffer::init(capacity)?,
        })
    }

    /// Store `handle`, returning the evicted oldest object or None.
    fn push(&mut self, handle: PyObject) -> Option<PyObject> {
        self.inner.push(handle)
    }

    fn pop(&mut self) -> Option<PyObject> {
        self.inner.pop()
    }

    fn peek(&self, py: Python, offset: isize) -> Option<PyObject> {
        self.inner.peek(offset).map(|handle| handle.clone_ref(py))
    }

    fn len(&self) -> usize {
        self.inner.len()
    }

    fn capacity(&self) -> usize {
        self.inner.capacity()
    }
}

#[pymodule]
fn handle_ring(_py: Python, m: &PyModule) -> PyResult<()> {
    m.add_class::<HandleRing>()?;
    Ok(())
}
