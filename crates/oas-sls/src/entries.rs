//! Helpers for objects that type one key and carry the rest verbatim while
//! keeping the typed key where the file had it.

use serde::{
  Serialize, Serializer,
  de::{DeserializeOwned, Error as DeError},
  ser::SerializeMap,
};
use serde_json::{Map, Value};

/// One typed entry lifted out of an object, plus everything else in order.
pub(crate) struct Split<T> {
  pub typed: Option<T>,
  /// Index among the remaining keys the typed entry sat in front of.
  pub position: Option<usize>,
  pub rest: Map<String, Value>,
}

/// Removes `key` from `raw` and parses it as `T`. A `null` entry still
/// records its position but yields no value.
pub(crate) fn split<T: DeserializeOwned, E: DeError>(raw: Map<String, Value>, key: &str) -> Result<Split<T>, E> {
  let mut rest = Map::with_capacity(raw.len());
  let mut found = None;

  for (name, value) in raw {
    if name == key {
      found = Some((rest.len(), value));
    } else {
      rest.insert(name, value);
    }
  }

  let (typed, position) = match found {
    None => (None, None),
    Some((position, Value::Null)) => (None, Some(position)),
    Some((position, value)) => {
      let typed = serde_json::from_value(value).map_err(|e| E::custom(format!("invalid '{key}': {e}")))?;
      (Some(typed), Some(position))
    }
  };

  Ok(Split { typed, position, rest })
}

/// Writes `rest` with `(key, typed)` reinserted at `position`, or last when
/// the entry is new.
pub(crate) fn serialize<S: Serializer, T: Serialize + ?Sized>(
  serializer: S,
  rest: &Map<String, Value>,
  key: &str,
  typed: Option<&T>,
  position: Option<usize>,
) -> Result<S::Ok, S::Error> {
  let slot = position.map_or(rest.len(), |p| p.min(rest.len()));
  let mut map = serializer.serialize_map(Some(rest.len() + usize::from(typed.is_some())))?;

  for (index, (name, value)) in rest.iter().enumerate() {
    if index == slot
      && let Some(typed) = typed
    {
      map.serialize_entry(key, typed)?;
    }
    map.serialize_entry(name, value)?;
  }
  if slot == rest.len()
    && let Some(typed) = typed
  {
    map.serialize_entry(key, typed)?;
  }

  map.end()
}
