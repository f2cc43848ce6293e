//! Exit code and temporariness resolution along a wrap chain.
//!
//! Both attributes are resolved the same way. Starting from an error, each
//! link of the chain is inspected in turn:
//!
//! 1. A [`DecoratedError`] with an explicit value returns it. Without one,
//!    resolution moves on to its wrapped error.
//! 2. A foreign error recognized by a capability probe returns the value it
//!    declares. The chain below it is not consulted.
//! 3. Any other error moves on to its [`Error::source`].
//!
//! When the chain runs out, the attribute's zero value (`0` or `false`) is
//! returned. Resolution never fails.

use std::{
    error::Error,
    fmt, io,
    sync::{OnceLock, PoisonError, RwLock},
};

use log::{debug, trace};

use crate::DecoratedError;

/// A foreign error that declares a process exit code.
pub trait ExitCoder {
    /// Returns the exit code for this error.
    fn exit_code(&self) -> i32;
}

/// A foreign error that declares whether retrying might succeed.
pub trait Temporary {
    /// Returns `true` if the condition behind this error may clear on its own.
    fn is_temporary(&self) -> bool;
}

impl Temporary for io::Error {
    fn is_temporary(&self) -> bool {
        matches!(
            self.kind(),
            io::ErrorKind::Interrupted | io::ErrorKind::WouldBlock | io::ErrorKind::TimedOut
        )
    }
}

type Probe<T> = fn(&(dyn Error + 'static)) -> Option<T>;

/// The registry behind [`exit_code`] and [`is_temporary`].
///
/// # Thread Safety
///
/// Registration takes the write lock. Resolution copies the probes out under
/// the read lock and runs without holding it.
static STANDARD: OnceLock<RwLock<Capabilities>> = OnceLock::new();

fn standard() -> &'static RwLock<Capabilities> {
    STANDARD.get_or_init(|| RwLock::new(Capabilities::new()))
}

fn standard_snapshot() -> Capabilities {
    standard()
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .clone()
}

/// The foreign error types whose declared attributes are honored during
/// resolution.
///
/// Trait objects cannot be asked whether their concrete type implements
/// [`ExitCoder`] or [`Temporary`], so each participating type is registered
/// as a downcast probe.
///
/// # Example
///
/// ```
/// # use std::fmt;
/// # use decor::{Capabilities, ExitCoder};
/// #[derive(Debug)]
/// struct Usage;
///
/// impl fmt::Display for Usage {
///     fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
///         f.write_str("bad usage")
///     }
/// }
///
/// impl std::error::Error for Usage {}
///
/// impl ExitCoder for Usage {
///     fn exit_code(&self) -> i32 {
///         2
///     }
/// }
///
/// let capabilities = Capabilities::new().with_exit_coder::<Usage>();
/// assert_eq!(capabilities.exit_code(Some(&Usage)), 2);
/// assert_eq!(Capabilities::empty().exit_code(Some(&Usage)), 0);
/// ```
///
/// To have the free functions honor a type, register it with
/// [`register_exit_coder`] or [`register_temporary`].
#[derive(Clone)]
pub struct Capabilities {
    exit_code: Vec<Probe<i32>>,
    temporary: Vec<Probe<bool>>,
}

impl Capabilities {
    /// Create a registry that only knows [`std::io::Error`] as [`Temporary`].
    pub fn new() -> Self {
        Self::empty().with_temporary::<io::Error>()
    }

    /// Create a registry with no probes.
    pub fn empty() -> Self {
        Self {
            exit_code: Vec::new(),
            temporary: Vec::new(),
        }
    }

    /// Honor the exit code declared by errors of type `E`.
    pub fn with_exit_coder<E>(mut self) -> Self
    where
        E: Error + ExitCoder + 'static,
    {
        self.exit_code.push(probe_exit_code::<E>);
        self
    }

    /// Honor the temporary flag declared by errors of type `E`.
    pub fn with_temporary<E>(mut self) -> Self
    where
        E: Error + Temporary + 'static,
    {
        self.temporary.push(probe_temporary::<E>);
        self
    }

    /// Resolve the exit code of `err` using these probes.
    pub fn exit_code(&self, err: Option<&(dyn Error + 'static)>) -> i32 {
        resolve::<ExitCode>(self, err)
    }

    /// Resolve whether `err` is temporary using these probes.
    pub fn is_temporary(&self, err: Option<&(dyn Error + 'static)>) -> bool {
        resolve::<Temporariness>(self, err)
    }
}

impl Default for Capabilities {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Capabilities {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Capabilities")
            .field("exit_code", &self.exit_code.len())
            .field("temporary", &self.temporary.len())
            .finish()
    }
}

/// Honor the exit code declared by errors of type `E` in [`exit_code`].
///
/// Registration is process-wide and cannot be undone.
///
/// # Example
///
/// ```
/// # use std::fmt;
/// # use decor::{DecoratedError, ExitCoder};
/// #[derive(Debug)]
/// struct Usage;
///
/// impl fmt::Display for Usage {
///     fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
///         f.write_str("bad usage")
///     }
/// }
///
/// impl std::error::Error for Usage {}
///
/// impl ExitCoder for Usage {
///     fn exit_code(&self) -> i32 {
///         64
///     }
/// }
///
/// decor::register_exit_coder::<Usage>();
///
/// let err = DecoratedError::wrap_with_message(Usage, "cannot start");
/// assert_eq!(decor::exit_code(Some(&err)), 64);
/// assert_eq!(err.exit_code(), 64);
/// ```
pub fn register_exit_coder<E>()
where
    E: Error + ExitCoder + 'static,
{
    let mut capabilities = standard().write().unwrap_or_else(PoisonError::into_inner);
    capabilities.exit_code.push(probe_exit_code::<E>);
    debug!(error_type = std::any::type_name::<E>(); "Registered exit code capability");
}

/// Honor the temporary flag declared by errors of type `E` in [`is_temporary`].
///
/// Registration is process-wide and cannot be undone.
pub fn register_temporary<E>()
where
    E: Error + Temporary + 'static,
{
    let mut capabilities = standard().write().unwrap_or_else(PoisonError::into_inner);
    capabilities.temporary.push(probe_temporary::<E>);
    debug!(error_type = std::any::type_name::<E>(); "Registered temporary capability");
}

/// Resolve the exit code of `err`, or `0` when nothing along its chain sets one.
///
/// Uses the standard [`Capabilities`]: [`std::io::Error`] plus every type
/// passed to [`register_exit_coder`].
///
/// # Example
///
/// ```
/// # use decor::DecoratedError;
/// let err = DecoratedError::wrap(DecoratedError::new("inner").with_exit_code(3));
///
/// assert_eq!(decor::exit_code(Some(&err)), 3);
/// assert_eq!(decor::exit_code(None), 0);
/// ```
pub fn exit_code(err: Option<&(dyn Error + 'static)>) -> i32 {
    standard_snapshot().exit_code(err)
}

/// Resolve whether `err` is temporary, or `false` when nothing along its chain
/// says so.
///
/// Uses the standard [`Capabilities`]: [`std::io::Error`] plus every type
/// passed to [`register_temporary`].
pub fn is_temporary(err: Option<&(dyn Error + 'static)>) -> bool {
    standard_snapshot().is_temporary(err)
}

/// An attribute resolved along a wrap chain.
trait Attribute {
    type Value: Copy + Default + fmt::Debug;

    const NAME: &'static str;

    /// The value set directly on a decorated error, if any.
    fn explicit(err: &DecoratedError) -> Option<Self::Value>;

    /// The probes that read the value from foreign errors.
    fn probes(capabilities: &Capabilities) -> &[Probe<Self::Value>];
}

struct ExitCode;

impl Attribute for ExitCode {
    type Value = i32;

    const NAME: &'static str = "exit_code";

    fn explicit(err: &DecoratedError) -> Option<i32> {
        err.explicit_exit_code()
    }

    fn probes(capabilities: &Capabilities) -> &[Probe<i32>] {
        &capabilities.exit_code
    }
}

struct Temporariness;

impl Attribute for Temporariness {
    type Value = bool;

    const NAME: &'static str = "temporary";

    fn explicit(err: &DecoratedError) -> Option<bool> {
        err.explicit_temporary()
    }

    fn probes(capabilities: &Capabilities) -> &[Probe<bool>] {
        &capabilities.temporary
    }
}

fn resolve<A: Attribute>(
    capabilities: &Capabilities,
    err: Option<&(dyn Error + 'static)>,
) -> A::Value {
    let mut current = err;
    let mut depth = 0usize;

    while let Some(err) = current {
        trace!(attribute = A::NAME, depth; "Inspecting chain link");

        if let Some(decorated) = err.downcast_ref::<DecoratedError>() {
            if let Some(value) = A::explicit(decorated) {
                debug!(attribute = A::NAME, depth, value:?; "Resolved from explicit override");
                return value;
            }
        } else if let Some(value) = A::probes(capabilities).iter().find_map(|probe| probe(err)) {
            debug!(attribute = A::NAME, depth, value:?; "Resolved from declared capability");
            return value;
        }

        current = err.source();
        depth += 1;
    }

    trace!(attribute = A::NAME, depth; "Chain exhausted, using zero value");
    A::Value::default()
}

fn probe_exit_code<E>(err: &(dyn Error + 'static)) -> Option<i32>
where
    E: Error + ExitCoder + 'static,
{
    err.downcast_ref::<E>().map(ExitCoder::exit_code)
}

fn probe_temporary<E>(err: &(dyn Error + 'static)) -> Option<bool>
where
    E: Error + Temporary + 'static,
{
    err.downcast_ref::<E>().map(Temporary::is_temporary)
}
