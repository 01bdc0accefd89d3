//! Method names that have an `...Async` counterpart in the ORM.

/// Closed list of synchronous member names with an asynchronous twin.
pub const SYNC_METHOD_NAMES: &[&str] = &[
    "ToList",
    "ToArray",
    "First",
    "FirstOrDefault",
    "Single",
    "SingleOrDefault",
    "Any",
    "Count",
    "All",
    "Last",
    "LastOrDefault",
    "ElementAt",
    "ElementAtOrDefault",
    "Min",
    "Max",
    "Sum",
    "Average",
    "Aggregate",
    "Contains",
    "SequenceEqual",
    "LongCount",
    "Load",
    "SaveChanges",
];

pub fn is_sync_method(name: &str) -> bool {
    SYNC_METHOD_NAMES.contains(&name)
}
