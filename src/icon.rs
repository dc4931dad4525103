//! Static wallet metadata assets.

/// Nightly wallet icon as a data URI, shown in the dApp's wallet list.
pub const NIGHTLY_ICON: &str = "data:image/svg+xml;base64,\
PHN2ZyB4bWxucz0iaHR0cDovL3d3dy53My5vcmcvMjAwMC9zdmciIHZpZXdC\
b3g9IjAgMCA0MCA0MCI+PHJlY3Qgd2lkdGg9IjQwIiBoZWlnaHQ9IjQwIiBy\
eD0iOCIgZmlsbD0iIzBkMTM0MiIvPjxwYXRoIGQ9Ik0yNy42IDI0LjljLTQu\
OSAzLjEtMTEgMi4zLTE1LTEuNy00LTQtNC44LTEwLjEtMS43LTE1YTEzLjMg\
MTMuMyAwIDEgMCAxNi43IDE2Ljd6IiBmaWxsPSIjZmZmIi8+PC9zdmc+";
