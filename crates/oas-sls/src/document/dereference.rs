use std::{
  collections::HashMap,
  path::{Component, Path, PathBuf},
};

use percent_encoding::percent_decode_str;
use serde_json::{Map, Value};

use super::DocumentLoader;
use crate::error::{Error, Result};

const REF_KEY: &str = "$ref";
const PATHS_KEY: &str = "paths";

/// Loads `path` and every file it references, then returns the root document
/// with each `{"$ref": ...}` under `paths` replaced by a copy of its target.
/// Other top-level sections are returned as written.
///
/// A reference back into a target that is still being expanded is left as
/// `{"$ref": ...}`, so recursive schemas come out finite.
///
/// References may point inside the same document (`#/definitions/Widget`) or
/// into a sibling file relative to the referring one
/// (`shared.yaml#/definitions/Error`). Remote URLs are never fetched.
pub async fn dereference(path: &Path) -> Result<Value> {
  let root = normalize(path);
  let mut documents: HashMap<PathBuf, Value> = HashMap::new();
  let mut pending = vec![root.clone()];

  while let Some(next) = pending.pop() {
    if documents.contains_key(&next) {
      continue;
    }
    let value = DocumentLoader::open(&next).await?.parse()?;
    let mut targets = Vec::new();
    collect_external(&value, &next, &mut targets);
    pending.extend(targets.into_iter().filter(|t| !documents.contains_key(t)));
    documents.insert(next, value);
  }

  let mut resolver = Resolver {
    documents: &documents,
    active: Vec::new(),
  };
  let mut document = documents[&root].clone();
  if let Some(paths) = documents[&root].get(PATHS_KEY) {
    document[PATHS_KEY] = resolver.resolve(paths, &root, &format!("/{PATHS_KEY}"))?;
  }
  Ok(document)
}

/// The first `$ref` left in `value`, which after [`dereference`] can only be
/// the point where a recursive schema loops back on itself.
pub(crate) fn remaining_reference(value: &Value) -> Option<&str> {
  match value {
    Value::Object(map) => match map.get(REF_KEY) {
      Some(Value::String(reference)) => Some(reference.as_str()),
      _ => map.values().find_map(remaining_reference),
    },
    Value::Array(items) => items.iter().find_map(remaining_reference),
    _ => None,
  }
}

struct Resolver<'a> {
  documents: &'a HashMap<PathBuf, Value>,
  active: Vec<(PathBuf, String)>,
}

impl Resolver<'_> {
  fn resolve(&mut self, value: &Value, document: &Path, location: &str) -> Result<Value> {
    match value {
      Value::Object(map) => {
        if let Some(reference) = map.get(REF_KEY) {
          let Value::String(reference) = reference else {
            return Err(Error::InvalidReference {
              pointer: location.to_string(),
              document: document.to_path_buf(),
            });
          };
          return self.follow(reference, document);
        }

        let mut resolved = Map::with_capacity(map.len());
        for (key, child) in map {
          let child_location = format!("{location}/{}", escape(key));
          resolved.insert(key.clone(), self.resolve(child, document, &child_location)?);
        }
        Ok(Value::Object(resolved))
      }
      Value::Array(items) => items
        .iter()
        .enumerate()
        .map(|(index, item)| self.resolve(item, document, &format!("{location}/{index}")))
        .collect::<Result<Vec<_>>>()
        .map(Value::Array),
      scalar => Ok(scalar.clone()),
    }
  }

  fn follow(&mut self, reference: &str, document: &Path) -> Result<Value> {
    let unresolved = || Error::UnresolvedReference {
      reference: reference.to_string(),
      document: document.to_path_buf(),
    };

    let (target_document, fragment) = split_reference(reference, document);
    let pointer = percent_decode_str(fragment)
      .decode_utf8()
      .map_err(|_| unresolved())?
      .into_owned();

    let key = (target_document, pointer);
    if self.active.contains(&key) {
      let mut cycle = Map::with_capacity(1);
      cycle.insert(REF_KEY.to_string(), Value::from(reference));
      return Ok(Value::Object(cycle));
    }

    let documents = self.documents;
    let root = documents.get(&key.0).ok_or_else(unresolved)?;
    let target = root.pointer(&key.1).ok_or_else(unresolved)?;

    let (target_document, pointer) = key.clone();
    self.active.push(key);
    let resolved = self.resolve(target, &target_document, &pointer);
    self.active.pop();
    resolved
  }
}

/// Splits `file#pointer` into the target document path and the raw fragment.
/// A `/` fragment is treated as the whole document.
fn split_reference<'r>(reference: &'r str, document: &Path) -> (PathBuf, &'r str) {
  let (file, fragment) = reference.split_once('#').unwrap_or((reference, ""));
  let target = if file.is_empty() {
    document.to_path_buf()
  } else {
    let base = document.parent().unwrap_or_else(|| Path::new(""));
    normalize(&base.join(file))
  };
  let fragment = if fragment == "/" { "" } else { fragment };
  (target, fragment)
}

fn is_remote(reference: &str) -> bool {
  reference.starts_with("http://") || reference.starts_with("https://")
}

fn collect_external(value: &Value, document: &Path, targets: &mut Vec<PathBuf>) {
  match value {
    Value::Object(map) => {
      if let Some(Value::String(reference)) = map.get(REF_KEY)
        && !reference.starts_with('#')
        && !is_remote(reference)
      {
        targets.push(split_reference(reference, document).0);
      }
      for child in map.values() {
        collect_external(child, document, targets);
      }
    }
    Value::Array(items) => {
      for item in items {
        collect_external(item, document, targets);
      }
    }
    _ => {}
  }
}

/// Lexically folds `.` and `..` so the same file reached through different
/// relative spellings is loaded once.
fn normalize(path: &Path) -> PathBuf {
  let mut out = PathBuf::new();
  for component in path.components() {
    match component {
      Component::CurDir => {}
      Component::ParentDir => {
        if out.file_name().is_some() {
          out.pop();
        } else {
          out.push("..");
        }
      }
      other => out.push(other),
    }
  }
  out
}

fn escape(key: &str) -> String {
  key.replace('~', "~0").replace('/', "~1")
}
