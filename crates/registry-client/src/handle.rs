//! Exclusive ownership of resources that must be released exactly once.

use std::ops::{Deref, DerefMut};

/// A resource with an explicit release step.
pub trait NativeResource {
    /// Free the resource. Called at most once per value by [`OwnedHandle`].
    fn release(&mut self);
}

/// Move-only owner of a [`NativeResource`].
///
/// The resource is released when the handle is dropped, unless ownership
/// was handed back with [`OwnedHandle::into_inner`]. The handle is not
/// `Clone`; moving it transfers responsibility for the release.
#[derive(Debug)]
pub struct OwnedHandle<R: NativeResource> {
    resource: Option<R>,
}

impl<R: NativeResource> OwnedHandle<R> {
    pub fn new(resource: R) -> Self {
        Self {
            resource: Some(resource),
        }
    }

    /// Give up ownership without releasing.
    pub fn into_inner(mut self) -> R {
        match self.resource.take() {
            Some(resource) => resource,
            // `resource` is only emptied here and in `drop`, both of which
            // consume the handle.
            None => unreachable!("owned handle emptied before into_inner"),
        }
    }

    /// Release now rather than at end of scope.
    pub fn release(mut self) {
        self.release_inner();
    }

    fn release_inner(&mut self) {
        if let Some(mut resource) = self.resource.take() {
            resource.release();
        }
    }
}

impl<R: NativeResource> Deref for OwnedHandle<R> {
    type Target = R;

    fn deref(&self) -> &R {
        match &self.resource {
            Some(resource) => resource,
            None => unreachable!("owned handle accessed after release"),
        }
    }
}

impl<R: NativeResource> DerefMut for OwnedHandle<R> {
    fn deref_mut(&mut self) -> &mut R {
        match &mut self.resource {
            Some(resource) => resource,
            None => unreachable!("owned handle accessed after release"),
        }
    }
}

impl<R: NativeResource> Drop for OwnedHandle<R> {
    fn drop(&mut self) {
        self.release_inner();
    }
}

/// A claim on the process-wide crypto runtime.
///
/// Claims are counted: acquiring initializes the runtime if needed, and
/// the runtime is cleaned up only when the last claim is released.
#[derive(Debug)]
pub struct CryptoRuntime {
    _private: (),
}

impl CryptoRuntime {
    pub fn acquire() -> Result<OwnedHandle<CryptoRuntime>, crypto_utils::CryptoError> {
        crypto_utils::runtime::acquire()?;
        Ok(OwnedHandle::new(CryptoRuntime { _private: () }))
    }
}

impl NativeResource for CryptoRuntime {
    fn release(&mut self) {
        crypto_utils::runtime::release();
    }
}
