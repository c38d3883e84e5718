// Copyright 2025 Eric Jingryd (tidynest@proton.me)
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Observable properties and two-way bindings
//!
//! Device entities expose their mutable fields as [`Property`] handles. Views
//! subscribe to them and editors are bound to them with
//! [`Property::bind_bidirectional`], so a change on either side reaches the
//! other synchronously.
//!
//! # Re-entrancy
//!
//! A `set()` on a property that is currently notifying its observers does not
//! recurse. The new value is stored and delivered in another pass once the
//! current pass finishes. Together with the equality check in `set()` this
//! makes binding cycles (A → B → A) terminate.
//!
//! # Example
//!
//! ```
//! use piper_gtk::core::property::{Adjustment, Property};
//!
//! let dpi = Property::new(5000u32);
//! let editor = Adjustment::new(0, 100, 4000);
//! let _binding = dpi.bind_bidirectional(editor.property());
//!
//! // The editor clamps, and the clamped value flows back
//! assert_eq!(editor.value(), 4000);
//! assert_eq!(dpi.get(), 4000);
//!
//! editor.set_value(800);
//! assert_eq!(dpi.get(), 800);
//! ```

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

/// Upper bound on re-delivery passes for a single `set()`
const MAX_NOTIFY_PASSES: usize = 16;

type Observer<T> = Rc<dyn Fn(&T)>;
type Coerce<T> = Box<dyn Fn(T) -> T>;

/// Identifies an observer registered with [`Property::subscribe`]
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct SubscriptionId(u64);

struct Inner<T> {
    value: RefCell<T>,
    coerce: Option<Coerce<T>>,
    observers: RefCell<Vec<(SubscriptionId, Observer<T>)>>,
    next_id: Cell<u64>,
    notifying: Cell<bool>,
    pending: Cell<bool>,
}

/// A shared, observable value
///
/// Cloning a `Property` yields another handle to the same value.
pub struct Property<T> {
    inner: Rc<Inner<T>>,
}

/// Non-owning handle to a [`Property`]
pub struct WeakProperty<T> {
    inner: Weak<Inner<T>>,
}

impl<T> Clone for Property<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T> Clone for WeakProperty<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Weak::clone(&self.inner),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Property<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Property")
            .field(&*self.inner.value.borrow())
            .finish()
    }
}

impl<T: Clone + PartialEq + 'static> Property<T> {
    /// Creates a property holding `value`
    pub fn new(value: T) -> Self {
        Self::build(value, None)
    }

    /// Creates a property whose every incoming value passes through `coerce`
    ///
    /// Used for range clamping: the stored value is always `coerce(v)`.
    pub fn with_coerce(value: T, coerce: impl Fn(T) -> T + 'static) -> Self {
        let value = coerce(value);
        Self::build(value, Some(Box::new(coerce)))
    }

    fn build(value: T, coerce: Option<Coerce<T>>) -> Self {
        Self {
            inner: Rc::new(Inner {
                value: RefCell::new(value),
                coerce,
                observers: RefCell::new(Vec::new()),
                next_id: Cell::new(0),
                notifying: Cell::new(false),
                pending: Cell::new(false),
            }),
        }
    }

    /// Returns a copy of the current value
    pub fn get(&self) -> T {
        self.inner.value.borrow().clone()
    }

    /// Stores `value` and notifies observers
    ///
    /// # Returns
    ///
    /// `true` if the stored value changed, `false` if it was already equal
    /// (after coercion) and nobody was notified.
    pub fn set(&self, value: T) -> bool {
        let value = match &self.inner.coerce {
            Some(coerce) => coerce(value),
            None => value,
        };

        if *self.inner.value.borrow() == value {
            return false;
        }

        *self.inner.value.borrow_mut() = value;
        self.notify();
        true
    }

    /// Re-applies the coercion to the current value
    ///
    /// Call after the inputs of the coercion changed (e.g. new bounds).
    pub fn revalidate(&self) -> bool {
        let current = self.get();
        self.set(current)
    }

    /// Registers an observer called with every new value
    pub fn subscribe(&self, observer: impl Fn(&T) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.inner.next_id.get());
        self.inner.next_id.set(id.0 + 1);
        self.inner
            .observers
            .borrow_mut()
            .push((id, Rc::new(observer)));
        id
    }

    /// Removes an observer. Returns `false` if it was already gone.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut observers = self.inner.observers.borrow_mut();
        let before = observers.len();
        observers.retain(|(existing, _)| *existing != id);
        observers.len() != before
    }

    /// Number of registered observers
    pub fn observer_count(&self) -> usize {
        self.inner.observers.borrow().len()
    }

    pub fn downgrade(&self) -> WeakProperty<T> {
        WeakProperty {
            inner: Rc::downgrade(&self.inner),
        }
    }

    /// Binds `self` and `target` in both directions
    ///
    /// `target` is synchronised from `self` immediately. If `target` coerces
    /// the value (e.g. clamps it), the coerced value is pushed back into
    /// `self`, so both sides agree once this returns. The binding holds only
    /// weak references and is removed when the returned [`Binding`] drops.
    pub fn bind_bidirectional(&self, target: &Property<T>) -> Binding<T> {
        let source_id = self.subscribe(forward(self.downgrade(), target.downgrade()));
        let target_id = target.subscribe(forward(target.downgrade(), self.downgrade()));

        target.set(self.get());
        if self.get() != target.get() {
            self.set(target.get());
        }

        Binding {
            source: self.downgrade(),
            source_id,
            target: target.downgrade(),
            target_id,
        }
    }

    fn notify(&self) {
        if self.inner.notifying.get() {
            self.inner.pending.set(true);
            return;
        }

        self.inner.notifying.set(true);
        for _ in 0..MAX_NOTIFY_PASSES {
            self.inner.pending.set(false);
            let value = self.get();

            // Snapshot so observers may subscribe/unsubscribe while running
            let observers: Vec<Observer<T>> = self
                .inner
                .observers
                .borrow()
                .iter()
                .map(|(_, observer)| Rc::clone(observer))
                .collect();

            for observer in observers {
                observer(&value);
            }

            if !self.inner.pending.get() {
                break;
            }
        }
        self.inner.notifying.set(false);
    }
}

/// Observer copying `from` into `to`; a value `to` coerces is written back
fn forward<T: Clone + PartialEq + 'static>(
    from: WeakProperty<T>,
    to: WeakProperty<T>,
) -> impl Fn(&T) + 'static {
    move |value| {
        let Some(to) = to.upgrade() else {
            return;
        };
        to.set(value.clone());

        let accepted = to.get();
        if accepted != *value {
            if let Some(from) = from.upgrade() {
                from.set(accepted);
            }
        }
    }
}

impl<T: Clone + PartialEq + 'static> WeakProperty<T> {
    pub fn upgrade(&self) -> Option<Property<T>> {
        self.inner.upgrade().map(|inner| Property { inner })
    }
}

/// A live two-way binding between two properties
///
/// Dropping it unsubscribes both directions.
pub struct Binding<T: Clone + PartialEq + 'static> {
    source: WeakProperty<T>,
    source_id: SubscriptionId,
    target: WeakProperty<T>,
    target_id: SubscriptionId,
}

impl<T: Clone + PartialEq + 'static> Drop for Binding<T> {
    fn drop(&mut self) {
        if let Some(source) = self.source.upgrade() {
            source.unsubscribe(self.source_id);
        }
        if let Some(target) = self.target.upgrade() {
            target.unsubscribe(self.target_id);
        }
    }
}

/// A numeric editor value clamped to `[lower, upper]`
///
/// This is the toolkit-agnostic half of a spin button: views mirror it into
/// their own widget adjustment.
#[derive(Clone)]
pub struct Adjustment {
    value: Property<u32>,
    bounds: Rc<Cell<(u32, u32)>>,
}

impl Adjustment {
    /// Creates an adjustment. `upper` below `lower` is raised to `lower`.
    pub fn new(value: u32, lower: u32, upper: u32) -> Self {
        let bounds = Rc::new(Cell::new((lower, upper.max(lower))));
        let clamp_bounds = Rc::clone(&bounds);
        let value = Property::with_coerce(value, move |v: u32| {
            let (lower, upper) = clamp_bounds.get();
            v.clamp(lower, upper)
        });

        Self { value, bounds }
    }

    pub fn value(&self) -> u32 {
        self.value.get()
    }

    /// Sets the value, clamped into range
    pub fn set_value(&self, value: u32) -> bool {
        self.value.set(value)
    }

    pub fn lower(&self) -> u32 {
        self.bounds.get().0
    }

    pub fn upper(&self) -> u32 {
        self.bounds.get().1
    }

    /// Changes the bounds and re-clamps the current value
    pub fn set_bounds(&self, lower: u32, upper: u32) {
        self.bounds.set((lower, upper.max(lower)));
        self.value.revalidate();
    }

    /// The underlying observable value, for binding and subscribing
    pub fn property(&self) -> &Property<u32> {
        &self.value
    }
}

impl fmt::Debug for Adjustment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Adjustment")
            .field("value", &self.value())
            .field("lower", &self.lower())
            .field("upper", &self.upper())
            .finish()
    }
}
