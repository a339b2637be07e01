//! Observable value cells for view state.
//!
//! An [`ObservableValue`] is a shared cell whose writes request a redraw, so view code
//! can update state from any callback and have the screen follow on the next frame.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::scheduler::RedrawScheduler;

/// Shared cell that schedules a redraw whenever a value is written.
///
/// Clones share the same value. Writing `None` is a read: nothing is stored and no
/// redraw is requested.
pub struct ObservableValue<T> {
    value: Rc<RefCell<T>>,
    scheduler: RedrawScheduler,
}

impl<T> Clone for ObservableValue<T> {
    fn clone(&self) -> Self {
        Self {
            value: Rc::clone(&self.value),
            scheduler: self.scheduler.clone(),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for ObservableValue<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ObservableValue")
            .field(&self.value.borrow())
            .finish()
    }
}

impl<T> ObservableValue<T> {
    /// Wrap `initial`, requesting redraws through `scheduler`.
    pub fn new(scheduler: RedrawScheduler, initial: T) -> Self {
        Self {
            value: Rc::new(RefCell::new(initial)),
            scheduler,
        }
    }

    /// Borrow the current value for the duration of `f`.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.value.borrow())
    }

    /// Store `value` and request a redraw.
    #[track_caller]
    pub fn set(&self, value: T) {
        *self.value.borrow_mut() = value;
        self.scheduler.schedule();
    }

    /// Mutate in place and request a redraw.
    #[track_caller]
    pub fn update(&self, f: impl FnOnce(&mut T)) {
        f(&mut self.value.borrow_mut());
        self.scheduler.schedule();
    }
}

impl<T: Clone> ObservableValue<T> {
    /// Current value.
    pub fn get(&self) -> T {
        self.value.borrow().clone()
    }

    /// Store `new_value` if present, then return the current value.
    #[track_caller]
    pub fn write(&self, new_value: Option<T>) -> T {
        if let Some(value) = new_value {
            self.set(value);
        }
        self.get()
    }
}

/// Value that flips between a default and an alternate.
///
/// Toggling from any value other than the alternate lands on the alternate.
#[derive(Debug, Clone)]
pub struct ToggleValue<T> {
    current: RefCell<T>,
    default: T,
    alternate: T,
}

impl<T: Clone + PartialEq> ToggleValue<T> {
    /// Start at `default`.
    pub fn new(default: T, alternate: T) -> Self {
        Self {
            current: RefCell::new(default.clone()),
            default,
            alternate,
        }
    }

    /// Current value.
    pub fn get(&self) -> T {
        self.current.borrow().clone()
    }

    /// Overwrite the current value.
    pub fn set(&self, value: T) {
        *self.current.borrow_mut() = value;
    }

    /// Flip and return the new value.
    pub fn toggle(&self) -> T {
        let next = if *self.current.borrow() == self.alternate {
            self.default.clone()
        } else {
            self.alternate.clone()
        };
        self.set(next.clone());
        next
    }
}
