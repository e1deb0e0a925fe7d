//! XML-RPC response bodies for the mock daemon.

/// `methodResponse` carrying `[true, <value>, 0]`.
pub fn success(value: &str) -> String {
    envelope(&format!(
        "<value><boolean>1</boolean></value>{value}<value><i4>0</i4></value>"
    ))
}

/// `methodResponse` carrying `[false, message, code]`.
pub fn failure(message: &str, code: i64) -> String {
    envelope(&format!(
        "<value><boolean>0</boolean></value>\
         <value><string>{message}</string></value>\
         <value><i4>{code}</i4></value>"
    ))
}

pub fn int(i: i64) -> String {
    format!("<value><i4>{i}</i4></value>")
}

/// A string value carrying an XML document, escaped as the daemon does.
pub fn document(xml: &str) -> String {
    let escaped = xml
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;");
    format!("<value><string>{escaped}</string></value>")
}

fn envelope(items: &str) -> String {
    format!(
        "<?xml version=\"1.0\"?>\
         <methodResponse><params><param><value><array><data>{items}</data></array></value>\
         </param></params></methodResponse>"
    )
}
