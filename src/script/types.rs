/// A single step of an edit script.
///
/// `Insert` carries an element of the right sequence,
/// `Delete` and `Keep` carry an element of the left sequence.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Command<T> {
    Insert(T),
    Delete(T),
    Keep(T),
}

impl<T> Command<T> {
    /// The element this command operates on.
    pub fn element(&self) -> &T {
        match self {
            Command::Insert(el) | Command::Delete(el) | Command::Keep(el) => el,
        }
    }

    pub fn into_element(self) -> T {
        match self {
            Command::Insert(el) | Command::Delete(el) | Command::Keep(el) => el,
        }
    }

    pub fn is_keep(&self) -> bool {
        matches!(self, Command::Keep(_))
    }

    /// Dispatches this command to the matching visitor callback.
    pub fn accept<V: CommandVisitor<T> + ?Sized>(&self, visitor: &mut V) -> Result<(), V::Error> {
        match self {
            Command::Insert(el) => visitor.visit_insert(el),
            Command::Delete(el) => visitor.visit_delete(el),
            Command::Keep(el) => visitor.visit_keep(el),
        }
    }
}

/// A trait for reacting to the commands of an [`EditScript`](crate::EditScript),
/// in script order.
///
/// Visitors that cannot fail should use [`std::convert::Infallible`] as `Error`.
pub trait CommandVisitor<T> {
    /// The error produced from the visit methods.
    type Error;

    /// Called for an element of the right sequence that must be inserted.
    fn visit_insert(&mut self, element: &T) -> Result<(), Self::Error>;

    /// Called for an element of the left sequence that must be deleted.
    fn visit_delete(&mut self, element: &T) -> Result<(), Self::Error>;

    /// Called for an element of the left sequence that is part of the LCS.
    fn visit_keep(&mut self, element: &T) -> Result<(), Self::Error>;
}

impl<'a, T, V: CommandVisitor<T> + ?Sized> CommandVisitor<T> for &'a mut V {
    type Error = V::Error;

    fn visit_insert(&mut self, element: &T) -> Result<(), Self::Error> {
        (**self).visit_insert(element)
    }

    fn visit_delete(&mut self, element: &T) -> Result<(), Self::Error> {
        (**self).visit_delete(element)
    }

    fn visit_keep(&mut self, element: &T) -> Result<(), Self::Error> {
        (**self).visit_keep(element)
    }
}
