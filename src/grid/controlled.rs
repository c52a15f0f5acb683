//! Per-category state ownership.
//!
//! Each grid state category is either owned by the grid or by the caller.
//! The choice is made once when the grid is built.

use std::fmt;

pub type ChangeCallback<T> = Box<dyn FnMut(&T)>;

pub enum StateSlot<T> {
    /// Caller owns the value. Changes are reported through `on_change` and
    /// only take effect once the caller pushes them back with [`StateSlot::sync`].
    Controlled {
        value: T,
        on_change: ChangeCallback<T>,
    },
    /// Grid owns the value.
    Uncontrolled { value: T },
}

impl<T: Default> Default for StateSlot<T> {
    fn default() -> Self {
        StateSlot::Uncontrolled {
            value: T::default(),
        }
    }
}

impl<T> StateSlot<T> {
    pub fn controlled(value: T, on_change: impl FnMut(&T) + 'static) -> Self {
        StateSlot::Controlled {
            value,
            on_change: Box::new(on_change),
        }
    }

    pub fn uncontrolled(value: T) -> Self {
        StateSlot::Uncontrolled { value }
    }

    pub fn get(&self) -> &T {
        match self {
            StateSlot::Controlled { value, .. } | StateSlot::Uncontrolled { value } => value,
        }
    }

    pub fn is_controlled(&self) -> bool {
        matches!(self, StateSlot::Controlled { .. })
    }

    /// Apply a change requested by a user action.
    pub fn update(&mut self, next: T) {
        match self {
            StateSlot::Controlled { on_change, .. } => on_change(&next),
            StateSlot::Uncontrolled { value } => *value = next,
        }
    }

    /// Replace the value supplied by the caller. Ignored for grid-owned state.
    pub fn sync(&mut self, next: T) -> bool {
        match self {
            StateSlot::Controlled { value, .. } => {
                *value = next;
                true
            }
            StateSlot::Uncontrolled { .. } => false,
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for StateSlot<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StateSlot::Controlled { value, .. } => {
                f.debug_tuple("Controlled").field(value).finish()
            }
            StateSlot::Uncontrolled { value } => f.debug_tuple("Uncontrolled").field(value).finish(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;

    #[test]
    fn test_uncontrolled_stores_value() {
        let mut slot = StateSlot::uncontrolled(1);
        slot.update(2);
        assert_eq!(*slot.get(), 2);
        assert!(!slot.sync(3));
        assert_eq!(*slot.get(), 2);
    }

    #[test]
    fn test_controlled_reports_without_mutating() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let mut slot = StateSlot::controlled(1, move |v: &i32| sink.borrow_mut().push(*v));

        slot.update(2);
        assert_eq!(*slot.get(), 1);
        assert_eq!(*seen.borrow(), vec![2]);

        assert!(slot.sync(2));
        assert_eq!(*slot.get(), 2);
    }
}
