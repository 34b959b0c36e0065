use std::fmt;

use serde::de::{self, Deserialize, Deserializer, MapAccess, Visitor};

pub const SKIP_INTEGRATION_TESTS: &str = "SKIP_INTEGRATION_TESTS";

const BUILD_ARG_FLAG: &str = "--build-arg";

/// Interprets the `skipIntegrationTests` input. Absent means `false`, otherwise only a
/// case-insensitive `true` is true.
pub fn skip_integration_tests(input: Option<&str>) -> bool {
    input.unwrap_or("false").eq_ignore_ascii_case("true")
}

/// User supplied build arguments in the order they appear in the JSON object.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ExtraBuildArgs(Vec<(String, String)>);

impl ExtraBuildArgs {
    /// Parses a JSON object such as `{"foo":"bar","spam":"eggs"}`. Absent or empty input is
    /// treated as `{}`.
    pub fn parse(input: Option<&str>) -> Result<Self, serde_json::Error> {
        match input.map(str::trim) {
            None | Some("") => Ok(Self::default()),
            Some(json) => serde_json::from_str(json),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(key, value)| (key.as_str(), value.as_str()))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn insert(&mut self, key: String, value: String) {
        match self.0.iter_mut().find(|(existing, _)| *existing == key) {
            Some((_, existing)) => *existing = value,
            None => self.0.push((key, value)),
        }
    }
}

/// A build argument value, JSON numbers and booleans are rendered as their JSON text.
struct BuildArgValue(String);

impl<'de> Deserialize<'de> for BuildArgValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct ValueVisitor;

        impl<'de> Visitor<'de> for ValueVisitor {
            type Value = BuildArgValue;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a string, number or boolean")
            }

            fn visit_str<E: de::Error>(self, value: &str) -> Result<Self::Value, E> {
                Ok(BuildArgValue(value.to_owned()))
            }

            fn visit_string<E: de::Error>(self, value: String) -> Result<Self::Value, E> {
                Ok(BuildArgValue(value))
            }

            fn visit_bool<E: de::Error>(self, value: bool) -> Result<Self::Value, E> {
                Ok(BuildArgValue(value.to_string()))
            }

            fn visit_i64<E: de::Error>(self, value: i64) -> Result<Self::Value, E> {
                Ok(BuildArgValue(value.to_string()))
            }

            fn visit_u64<E: de::Error>(self, value: u64) -> Result<Self::Value, E> {
                Ok(BuildArgValue(value.to_string()))
            }

            fn visit_f64<E: de::Error>(self, value: f64) -> Result<Self::Value, E> {
                Ok(BuildArgValue(value.to_string()))
            }
        }

        deserializer.deserialize_any(ValueVisitor)
    }
}

impl<'de> Deserialize<'de> for ExtraBuildArgs {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct ArgsVisitor;

        impl<'de> Visitor<'de> for ArgsVisitor {
            type Value = ExtraBuildArgs;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a JSON object mapping build argument names to values")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                let mut args = ExtraBuildArgs(Vec::with_capacity(map.size_hint().unwrap_or(0)));
                while let Some((key, BuildArgValue(value))) = map.next_entry::<String, _>()? {
                    args.insert(key, value);
                }
                Ok(args)
            }
        }

        deserializer.deserialize_map(ArgsVisitor)
    }
}

/// The ordered `KEY=VALUE` pairs passed to `docker build`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildArgs(Vec<String>);

impl BuildArgs {
    pub fn new(skip_integration_tests: bool, extra: &ExtraBuildArgs) -> Self {
        let mut args = Vec::with_capacity(1 + extra.0.len());
        args.push(format!("{SKIP_INTEGRATION_TESTS}={skip_integration_tests}"));
        args.extend(extra.iter().map(|(key, value)| format!("{key}={value}")));
        Self(args)
    }

    pub fn pairs(&self) -> &[String] {
        &self.0
    }

    /// Flattens the pairs into `--build-arg KEY=VALUE` command line arguments.
    pub fn to_args(&self) -> Vec<&str> {
        self.0
            .iter()
            .flat_map(|pair| [BUILD_ARG_FLAG, pair.as_str()])
            .collect()
    }
}
