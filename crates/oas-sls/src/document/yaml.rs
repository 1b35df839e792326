use serde_json::{Map, Number, Value};
use serde_yaml_ng::{Value as YamlValue, value::TaggedValue};

use crate::error::{Error, Result};

/// Short-form intrinsics whose long form is `Fn::<Name>`.
const FN_TAGS: [&str; 17] = [
  "And",
  "Base64",
  "Cidr",
  "Equals",
  "FindInMap",
  "GetAZs",
  "GetAtt",
  "If",
  "ImportValue",
  "Join",
  "Not",
  "Or",
  "Select",
  "Split",
  "Sub",
  "ToJsonString",
  "Transform",
];

/// Converts a parsed YAML tree into JSON.
///
/// CloudFormation short forms become their long forms (`!Ref X` is
/// `{"Ref": "X"}`, `!GetAtt A.B` is `{"Fn::GetAtt": ["A", "B"]}`). Any other
/// tag is kept as a single-key object `{"!Tag": value}`.
pub(crate) fn to_json(value: YamlValue, location: &str) -> Result<Value> {
  Ok(match value {
    YamlValue::Null => Value::Null,
    YamlValue::Bool(flag) => Value::Bool(flag),
    YamlValue::Number(n) => number(&n),
    YamlValue::String(s) => Value::String(s),
    YamlValue::Sequence(items) => Value::Array(
      items
        .into_iter()
        .enumerate()
        .map(|(index, item)| to_json(item, &format!("{location}[{index}]")))
        .collect::<Result<_>>()?,
    ),
    YamlValue::Mapping(mapping) => {
      let mut object = Map::with_capacity(mapping.len());
      for (key, child) in mapping {
        let key = mapping_key(key, location)?;
        let child = to_json(child, &format!("{location}.{key}"))?;
        object.insert(key, child);
      }
      Value::Object(object)
    }
    YamlValue::Tagged(tagged) => intrinsic(*tagged, location)?,
  })
}

fn intrinsic(tagged: TaggedValue, location: &str) -> Result<Value> {
  let tag = tagged.tag.to_string();
  let name = tag.trim_start_matches('!');
  let value = to_json(tagged.value, location)?;

  let (key, value) = match name {
    "Ref" | "Condition" => (name.to_string(), value),
    "GetAtt" => (format!("Fn::{name}"), split_attribute(value)),
    _ if FN_TAGS.contains(&name) => (format!("Fn::{name}"), value),
    _ => (format!("!{name}"), value),
  };

  let mut object = Map::with_capacity(1);
  object.insert(key, value);
  Ok(Value::Object(object))
}

/// `!GetAtt Resource.Attr.Sub` names the resource before the first dot.
fn split_attribute(value: Value) -> Value {
  match value {
    Value::String(s) => match s.split_once('.') {
      Some((resource, attribute)) => Value::Array(vec![Value::from(resource), Value::from(attribute)]),
      None => Value::String(s),
    },
    other => other,
  }
}

fn number(n: &serde_yaml_ng::Number) -> Value {
  if let Some(u) = n.as_u64() {
    Value::from(u)
  } else if let Some(i) = n.as_i64() {
    Value::from(i)
  } else {
    n.as_f64().and_then(Number::from_f64).map_or(Value::Null, Value::Number)
  }
}

fn mapping_key(key: YamlValue, location: &str) -> Result<String> {
  match key {
    YamlValue::String(s) => Ok(s),
    YamlValue::Bool(flag) => Ok(flag.to_string()),
    YamlValue::Number(n) => Ok(n.to_string()),
    YamlValue::Null => Ok("null".to_string()),
    _ => Err(Error::InvalidDocument {
      location: location.to_string(),
      message: "mapping keys must be scalars".to_string(),
    }),
  }
}

#[cfg(test)]
mod tests {
  use serde_json::json;

  use super::*;

  fn convert(source: &str) -> Value {
    to_json(serde_yaml_ng::from_str(source).unwrap(), "").unwrap()
  }

  #[test]
  fn test_short_form_intrinsics() {
    let cases = [
      ("!Ref ApiGatewayRestApi", json!({ "Ref": "ApiGatewayRestApi" })),
      ("!GetAtt Bucket.Arn", json!({ "Fn::GetAtt": ["Bucket", "Arn"] })),
      ("!GetAtt [Bucket, Arn]", json!({ "Fn::GetAtt": ["Bucket", "Arn"] })),
      ("!Sub 'arn:${AWS::Partition}:s3:::b'", json!({ "Fn::Sub": "arn:${AWS::Partition}:s3:::b" })),
      ("!Join ['', [a, b]]", json!({ "Fn::Join": ["", ["a", "b"]] })),
      ("!Condition IsProd", json!({ "Condition": "IsProd" })),
      ("!Custom text", json!({ "!Custom": "text" })),
    ];
    for (source, expected) in cases {
      assert_eq!(convert(source), expected, "{source}");
    }
  }

  #[test]
  fn test_nested_tags_and_plain_values() {
    let value = convert(
      "Outputs:\n  Arn:\n    Value: !Sub\n      - '${Api}/dev'\n      - Api: !Ref ApiGatewayRestApi\nCount: 3\nRatio: 0.5\n1: one\n",
    );
    assert_eq!(
      value,
      json!({
        "Outputs": { "Arn": { "Value": { "Fn::Sub": ["${Api}/dev", { "Api": { "Ref": "ApiGatewayRestApi" } }] } } },
        "Count": 3,
        "Ratio": 0.5,
        "1": "one"
      })
    );
  }

  #[test]
  fn test_non_scalar_key_is_rejected() {
    let yaml: YamlValue = serde_yaml_ng::from_str("? [a, b]\n: c\n").unwrap();
    assert!(matches!(to_json(yaml, ""), Err(Error::InvalidDocument { .. })));
  }
}
