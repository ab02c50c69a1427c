//! Building trees from untyped TOML.
//!
//! This is the one place where block and docstring types are checked at
//! runtime. Typed callers get the same guarantees from the compiler.
//!
//! ```toml
//! name = "cats"
//! docstring = { name = "Cat helpers." }
//!
//! [[body]]
//! kind = "define"
//! name = "count"
//! params = ["cats"]
//! returns = "len(cats)"
//! ```

use std::{path::Path, str::FromStr};

use pypoet_core::{Error, Result, SourceContext};
use toml::{Table, Value};

use crate::{Block, DocString, Kind, Module, block::DEFAULT_BASE};

const COMMON_KEYS: &[&str] = &["kind", "docstring", "body"];

impl Block {
    /// Decode a block table, including its nested body.
    pub fn from_value(value: &Value) -> Result<Self> {
        decode_block(value, "block")
    }
}

impl DocString {
    /// Decode a docstring table.
    pub fn from_value(value: &Value) -> Result<Self> {
        decode_docstring(value, "docstring")
    }
}

impl FromStr for Module {
    type Err = Box<Error>;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_toml_str(s, "module.toml")
    }
}

impl Module {
    /// Parse a module description with a custom filename for error reporting.
    pub fn from_toml_str(content: &str, filename: &str) -> Result<Self> {
        let ctx = SourceContext::new(content, filename);
        let table: Table = toml::from_str(content).map_err(|e| ctx.parse_error(e))?;
        decode_module(&table).map_err(|e| match *e {
            Error::Validation { message } => ctx.validation_error(message),
            other => Box::new(other),
        })
    }

    /// Parse a module description from a file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        Self::from_toml_str(&content, &path.display().to_string())
    }

    /// Decode a module table.
    pub fn from_value(value: &Value) -> Result<Self> {
        match value {
            Value::Table(table) => decode_module(table),
            other => Err(Error::validation(format!(
                "module must be a table, found {}",
                other.type_str()
            ))),
        }
    }
}

fn decode_module(table: &Table) -> Result<Module> {
    check_keys(table, &["name", "docstring", "body"], &[], "module")?;

    let mut module = Module::new(required_str(table, "name", "module")?);
    if let Some(doc) = table.get("docstring") {
        module.set_docstring(decode_docstring(doc, "docstring")?);
    }
    for child in body(table, "body")? {
        module.push(child);
    }
    Ok(module)
}

fn decode_block(value: &Value, field: &str) -> Result<Block> {
    let table = match value {
        Value::Table(table) => table,
        other => return Err(Error::invalid_child(field, other.type_str())),
    };
    let kind = match table.get("kind") {
        Some(Value::String(kind)) => kind.as_str(),
        Some(other) => return Err(Error::invalid_child(format!("{field}.kind"), other.type_str())),
        None => return Err(Error::invalid_child(field, "a table without 'kind'")),
    };

    let kind = match kind {
        "statement" => Kind::Statement(required_str(table, "text", field)?),
        "if" => Kind::If {
            expr: required_str(table, "expr", field)?,
        },
        "elif" => Kind::ElIf {
            expr: required_str(table, "expr", field)?,
        },
        "else" => Kind::Else,
        "for" => Kind::ForLoop {
            index: required_str(table, "index", field)?,
            iterable: required_str(table, "iterable", field)?,
        },
        "while" => Kind::WhileLoop {
            expr: required_str(table, "expr", field)?,
        },
        "define" => Kind::Define {
            name: required_str(table, "name", field)?,
            params: string_list(table, "params", field)?,
        },
        "class" => {
            let mut bases = string_list(table, "bases", field)?;
            if bases.is_empty() {
                bases.push(DEFAULT_BASE.to_string());
            }
            Kind::Class {
                name: required_str(table, "name", field)?,
                bases,
            }
        }
        other => return Err(Error::not_implemented(other)),
    };
    check_keys(table, COMMON_KEYS, kind_keys(&kind), field)?;

    let mut block = Block::new(kind);
    if let Some(doc) = table.get("docstring") {
        block.set_docstring(decode_docstring(doc, &format!("{field}.docstring"))?);
    }
    for child in body(table, &format!("{field}.body"))? {
        block.push(child);
    }
    if let Some(ret) = optional_str(table, "returns", field)? {
        block.set_returns(ret);
    }
    Ok(block)
}

fn decode_docstring(value: &Value, field: &str) -> Result<DocString> {
    let table = match value {
        Value::Table(table) => table,
        other => return Err(Error::invalid_docstring(field, other.type_str())),
    };
    let name = match table.get("name") {
        Some(Value::String(name)) => name,
        _ => return Err(Error::invalid_docstring(field, "a table without a string 'name'")),
    };

    let mut doc = DocString::new(name.as_str());
    for (key, value) in table {
        match (key.as_str(), value) {
            ("name", _) => {}
            ("description", Value::String(s)) => doc = doc.description(s.as_str()),
            ("returns", Value::String(s)) => doc = doc.returns(s.as_str()),
            ("args", Value::Array(items)) => {
                for item in items {
                    match item {
                        Value::String(arg) => doc = doc.arg(arg.as_str()),
                        other => {
                            return Err(Error::invalid_docstring(
                                format!("{field}.args"),
                                format!("an array containing {}", other.type_str()),
                            ));
                        }
                    }
                }
            }
            (key, other) => {
                return Err(Error::invalid_docstring(
                    format!("{field}.{key}"),
                    other.type_str(),
                ));
            }
        }
    }
    Ok(doc)
}

/// Keys a block of this kind accepts besides [`COMMON_KEYS`].
fn kind_keys(kind: &Kind) -> &'static [&'static str] {
    match kind {
        Kind::Statement(_) => &["text"],
        Kind::If { .. } | Kind::ElIf { .. } | Kind::WhileLoop { .. } => &["expr"],
        Kind::Else => &[],
        Kind::ForLoop { .. } => &["index", "iterable"],
        Kind::Define { .. } => &["name", "params", "returns"],
        Kind::Class { .. } => &["name", "bases"],
    }
}

fn body(table: &Table, path: &str) -> Result<Vec<Block>> {
    match table.get("body") {
        None => Ok(Vec::new()),
        Some(Value::Array(items)) => items
            .iter()
            .enumerate()
            .map(|(i, item)| decode_block(item, &format!("{path}[{i}]")))
            .collect(),
        Some(other) => Err(Error::invalid_child(path, other.type_str())),
    }
}

fn check_keys(table: &Table, allowed: &[&str], extra: &[&str], field: &str) -> Result<()> {
    for key in table.keys() {
        let key = key.as_str();
        if !allowed.contains(&key) && !extra.contains(&key) {
            return Err(Error::validation(format!("{field}: unknown key '{key}'")));
        }
    }
    Ok(())
}

fn required_str(table: &Table, key: &str, field: &str) -> Result<String> {
    optional_str(table, key, field)?
        .ok_or_else(|| Error::validation(format!("{field}: missing required string '{key}'")))
}

fn optional_str(table: &Table, key: &str, field: &str) -> Result<Option<String>> {
    match table.get(key) {
        None => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(other) => Err(Error::validation(format!(
            "{field}.{key} must be a string, found {}",
            other.type_str()
        ))),
    }
}

fn string_list(table: &Table, key: &str, field: &str) -> Result<Vec<String>> {
    match table.get(key) {
        None => Ok(Vec::new()),
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| match item {
                Value::String(s) => Ok(s.clone()),
                other => Err(Error::validation(format!(
                    "{field}.{key} must contain only strings, found {}",
                    other.type_str()
                ))),
            })
            .collect(),
        Some(other) => Err(Error::validation(format!(
            "{field}.{key} must be an array of strings, found {}",
            other.type_str()
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Renderable;

    fn value(src: &str) -> Value {
        Value::Table(toml::from_str(src).unwrap())
    }

    #[test]
    fn test_decode_define() {
        let block = Block::from_value(&value(
            r#"
            kind = "define"
            name = "count"
            params = ["cats"]
            returns = "len(cats)"
            docstring = { name = "Count cats.", args = ["cats"], returns = "int" }
            "#,
        ))
        .unwrap();

        let expected = Block::define("count", ["cats"])
            .docstring(DocString::new("Count cats.").arg("cats").returns("int"))
            .returns("len(cats)");
        assert_eq!(block, expected);
    }

    #[test]
    fn test_decode_nested_body() {
        let block = Block::from_value(&value(
            r#"
            kind = "for"
            index = "cat"
            iterable = "cats"

            [[body]]
            kind = "if"
            expr = "cat.hungry"
            body = [{ kind = "statement", text = "feed(cat)" }]

            [[body]]
            kind = "else"
            body = [{ kind = "statement", text = "pet(cat)" }]
            "#,
        ))
        .unwrap();

        assert_eq!(
            block.text(),
            "for cat in cats:\n    if cat.hungry:\n        feed(cat)\n    else:\n        pet(cat)\n"
        );
    }

    #[test]
    fn test_decode_class_default_base() {
        let block = Block::from_value(&value("kind = \"class\"\nname = \"Cat\"\n")).unwrap();
        assert_eq!(block.entry_line(), "class Cat(object):");
    }

    #[test]
    fn test_docstring_must_be_table() {
        let err = Block::from_value(&value(
            "kind = \"define\"\nname = \"f\"\ndocstring = \"not a docstring\"\n",
        ))
        .unwrap_err();

        match *err {
            Error::InvalidDocStringType { field, found } => {
                assert_eq!(field, "block.docstring");
                assert_eq!(found, "string");
            }
            other => panic!("expected InvalidDocStringType, got {other:?}"),
        }
    }

    #[test]
    fn test_module_docstring_must_be_table() {
        let err = Module::from_toml_str("name = \"m\"\ndocstring = 5\n", "m.toml").unwrap_err();

        match *err {
            Error::InvalidDocStringType { field, found } => {
                assert_eq!(field, "docstring");
                assert_eq!(found, "integer");
            }
            other => panic!("expected InvalidDocStringType, got {other:?}"),
        }
    }

    #[test]
    fn test_docstring_requires_name() {
        let err = DocString::from_value(&value("description = \"x\"\n")).unwrap_err();
        assert!(matches!(*err, Error::InvalidDocStringType { .. }));
    }

    #[test]
    fn test_docstring_rejects_unknown_key() {
        let err = DocString::from_value(&value("name = \"x\"\nraises = \"E\"\n")).unwrap_err();
        match *err {
            Error::InvalidDocStringType { field, .. } => assert_eq!(field, "docstring.raises"),
            other => panic!("expected InvalidDocStringType, got {other:?}"),
        }
    }

    #[test]
    fn test_child_must_be_block() {
        let err = Block::from_value(&value(
            "kind = \"if\"\nexpr = \"x\"\nbody = [\"not a block\"]\n",
        ))
        .unwrap_err();

        match *err {
            Error::InvalidChildType { field, found } => {
                assert_eq!(field, "block.body[0]");
                assert_eq!(found, "string");
            }
            other => panic!("expected InvalidChildType, got {other:?}"),
        }
    }

    #[test]
    fn test_child_requires_kind() {
        let err = Block::from_value(&value("text = \"x = 1\"\n")).unwrap_err();
        assert!(matches!(*err, Error::InvalidChildType { .. }));
    }

    #[test]
    fn test_abstract_block_is_not_implemented() {
        let err = Block::from_value(&value("kind = \"block\"\n")).unwrap_err();
        match *err {
            Error::NotImplemented { kind } => assert_eq!(kind, "block"),
            other => panic!("expected NotImplemented, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_required_key() {
        let err = Block::from_value(&value("kind = \"if\"\n")).unwrap_err();
        assert!(matches!(*err, Error::Validation { .. }));
        assert!(err.to_string().contains("missing required string 'expr'"));
    }

    #[test]
    fn test_returns_only_on_define() {
        let err = Block::from_value(&value(
            "kind = \"if\"\nexpr = \"x\"\nreturns = \"1\"\n",
        ))
        .unwrap_err();
        assert!(err.to_string().contains("unknown key 'returns'"));
    }

    #[test]
    fn test_module_from_toml_str() {
        let module = Module::from_toml_str(
            r#"
            name = "cats"
            docstring = { name = "Cat helpers." }

            [[body]]
            kind = "statement"
            text = "CATS = []"
            "#,
            "cats.toml",
        )
        .unwrap();

        assert_eq!(module.name(), "cats");
        assert_eq!(module.text(), "\"\"\"Cat helpers.\n\"\"\"\n\nCATS = []\n");
    }

    #[test]
    fn test_module_default_docstring() {
        let module: Module = "name = \"m\"\n".parse().unwrap();
        assert_eq!(module, Module::new("m"));
    }

    #[test]
    fn test_module_validation_names_file() {
        let err = Module::from_toml_str("title = \"m\"\n", "gen.toml").unwrap_err();
        assert!(err.to_string().starts_with("gen.toml: "));
    }

    #[test]
    fn test_module_parse_error() {
        let err = "name = ".parse::<Module>().unwrap_err();
        assert!(matches!(*err, Error::Parse { .. }));
    }
}
