/*!
Databases of clause related things.

- A [clause store](store) owns the clauses of a formula and fixes their memory layout.
- An [occurrence index](occurrence) maps literals to the clauses containing them, and is
  the mutable working structure of [gate recognition](crate::gates).

Clauses are addressed by [ClauseId], an index into the owning store, so the index holds no
references into the store and the store may be read freely while an index is live.
*/

pub mod occurrence;
pub mod store;

/// The position of a clause in the owning store.
pub type ClauseId = usize;
