//! XML-RPC codec.
//!
//! Encodes `methodCall` documents and decodes `methodResponse` documents,
//! then unpacks the OpenNebula result envelope `[success, payload, code]`.

use std::collections::BTreeMap;
use std::io::Cursor;

use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};

use crate::domain::{Element, RpcError, RpcValue};

// ── Encoding ─────────────────────────────────────────────────────────────────

/// Render a `methodCall` document.
///
/// # Errors
///
/// Returns [`RpcError::Encode`] if the writer fails.
pub fn encode_call(method: &str, params: &[RpcValue]) -> Result<String, RpcError> {
    let mut writer = Writer::new(Cursor::new(Vec::new()));

    emit(&mut writer, Event::Decl(BytesDecl::new("1.0", None, None)))?;
    open(&mut writer, "methodCall")?;
    text_element(&mut writer, "methodName", method)?;
    open(&mut writer, "params")?;
    for param in params {
        open(&mut writer, "param")?;
        write_value(&mut writer, param)?;
        close(&mut writer, "param")?;
    }
    close(&mut writer, "params")?;
    close(&mut writer, "methodCall")?;

    String::from_utf8(writer.into_inner().into_inner()).map_err(|e| RpcError::Encode(e.to_string()))
}

fn write_value<W: std::io::Write>(writer: &mut Writer<W>, value: &RpcValue) -> Result<(), RpcError> {
    open(writer, "value")?;
    match value {
        RpcValue::Int(i) => text_element(writer, "int", &i.to_string())?,
        RpcValue::Bool(b) => text_element(writer, "boolean", if *b { "1" } else { "0" })?,
        RpcValue::Double(d) => text_element(writer, "double", &d.to_string())?,
        RpcValue::Str(s) => text_element(writer, "string", s)?,
        RpcValue::Array(items) => {
            open(writer, "array")?;
            open(writer, "data")?;
            for item in items {
                write_value(writer, item)?;
            }
            close(writer, "data")?;
            close(writer, "array")?;
        }
        RpcValue::Struct(members) => {
            open(writer, "struct")?;
            for (name, member) in members {
                open(writer, "member")?;
                text_element(writer, "name", name)?;
                write_value(writer, member)?;
                close(writer, "member")?;
            }
            close(writer, "struct")?;
        }
    }
    close(writer, "value")
}

fn text_element<W: std::io::Write>(
    writer: &mut Writer<W>,
    name: &str,
    text: &str,
) -> Result<(), RpcError> {
    open(writer, name)?;
    emit(writer, Event::Text(BytesText::new(text)))?;
    close(writer, name)
}

fn open<W: std::io::Write>(writer: &mut Writer<W>, name: &str) -> Result<(), RpcError> {
    emit(writer, Event::Start(BytesStart::new(name)))
}

fn close<W: std::io::Write>(writer: &mut Writer<W>, name: &str) -> Result<(), RpcError> {
    emit(writer, Event::End(BytesEnd::new(name)))
}

fn emit<W: std::io::Write>(writer: &mut Writer<W>, event: Event<'_>) -> Result<(), RpcError> {
    writer
        .write_event(event)
        .map_err(|e| RpcError::Encode(e.to_string()))
}

// ── Decoding ─────────────────────────────────────────────────────────────────

fn missing(what: &str) -> RpcError {
    RpcError::Decode(format!("missing <{what}>"))
}

fn read_value(value: &Element) -> Result<RpcValue, RpcError> {
    // A <value> without a type element is a string.
    let Some(typed) = value.children.first() else {
        return Ok(RpcValue::Str(value.text.clone()));
    };
    let scalar = typed.text.trim();
    match typed.name.as_str() {
        "int" | "i4" | "i8" => scalar
            .parse()
            .map(RpcValue::Int)
            .map_err(|_| RpcError::Decode(format!("bad integer '{scalar}'"))),
        "boolean" => match scalar {
            "1" => Ok(RpcValue::Bool(true)),
            "0" => Ok(RpcValue::Bool(false)),
            other => Err(RpcError::Decode(format!("bad boolean '{other}'"))),
        },
        "double" => scalar
            .parse()
            .map(RpcValue::Double)
            .map_err(|_| RpcError::Decode(format!("bad double '{scalar}'"))),
        "string" => Ok(RpcValue::Str(typed.text.clone())),
        "array" => {
            let data = typed.child("data").ok_or_else(|| missing("data"))?;
            data.children
                .iter()
                .filter(|c| c.name == "value")
                .map(read_value)
                .collect::<Result<Vec<_>, _>>()
                .map(RpcValue::Array)
        }
        "struct" => {
            let mut members = BTreeMap::new();
            for member in typed.children.iter().filter(|c| c.name == "member") {
                let name = member.child("name").ok_or_else(|| missing("name"))?;
                let value = member.child("value").ok_or_else(|| missing("value"))?;
                members.insert(name.text.clone(), read_value(value)?);
            }
            Ok(RpcValue::Struct(members))
        }
        other => Err(RpcError::Decode(format!("unsupported type <{other}>"))),
    }
}

/// Decode a `methodResponse` document into its single return value.
///
/// An XML-RPC `<fault>` becomes [`RpcError::Fault`].
///
/// # Errors
///
/// Returns [`RpcError::Decode`] for malformed documents.
pub fn decode_response(method: &str, xml: &str) -> Result<RpcValue, RpcError> {
    let root = Element::parse(xml).map_err(|e| RpcError::Decode(e.to_string()))?;
    if root.name != "methodResponse" {
        return Err(RpcError::Decode(format!(
            "expected <methodResponse>, got <{}>",
            root.name
        )));
    }

    if let Some(fault) = root.child("fault") {
        let value = read_value(fault.child("value").ok_or_else(|| missing("value"))?)?;
        let RpcValue::Struct(members) = value else {
            return Err(RpcError::Decode("fault is not a struct".to_string()));
        };
        return Err(RpcError::Fault {
            method: method.to_string(),
            code: members
                .get("faultCode")
                .and_then(RpcValue::as_i64)
                .unwrap_or(-1),
            message: members
                .get("faultString")
                .and_then(RpcValue::as_str)
                .unwrap_or_default()
                .to_string(),
        });
    }

    let value = root
        .child("params")
        .and_then(|p| p.child("param"))
        .and_then(|p| p.child("value"))
        .ok_or_else(|| missing("params/param/value"))?;
    read_value(value)
}

/// Unpack the OpenNebula envelope `[success, payload, error_code, ...]`.
///
/// # Errors
///
/// Returns [`RpcError::Fault`] when `success` is false and
/// [`RpcError::Decode`] when the value is not an envelope.
pub fn unpack_envelope(method: &str, value: RpcValue) -> Result<RpcValue, RpcError> {
    let RpcValue::Array(mut items) = value else {
        return Err(RpcError::Decode(format!("{method} did not return an array")));
    };
    if items.len() < 2 {
        return Err(RpcError::Decode(format!(
            "{method} returned {} element(s), expected at least 2",
            items.len()
        )));
    }
    let code = items.get(2).and_then(RpcValue::as_i64).unwrap_or(-1);
    match items[0].as_bool() {
        Some(true) => Ok(items.swap_remove(1)),
        Some(false) => Err(RpcError::Fault {
            method: method.to_string(),
            code,
            message: items[1].to_string(),
        }),
        None => Err(RpcError::Decode(format!(
            "{method} envelope does not start with a boolean"
        ))),
    }
}
