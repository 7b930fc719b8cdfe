use memchr::memmem;

const DECL_OPEN: &str = "<?xml";
const DECL_CLOSE: &str = "?>";
const CDATA_OPEN: &str = "<![CDATA[";
const CDATA_CLOSE: &str = "]]>";

/// Repairs the parts of a reply the core client is known to get wrong.
///
/// Every `<?xml ... ?>` declaration is removed wherever it appears (replies
/// sometimes embed a second declaration after the root element), and bare
/// `&` characters outside CDATA sections are escaped unless they begin one of
/// the predefined entities or a numeric character reference.
#[must_use]
pub fn preprocess(text: &str) -> String {
    escape_bare_ampersands(&strip_declarations(text))
}

fn strip_declarations(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(start) = memmem::find(rest.as_bytes(), b"<?") {
        let (head, tail) = rest.split_at(start);
        // A CDATA section opened before this point shields the declaration.
        if let Some(cdata) = memmem::find(head.as_bytes(), CDATA_OPEN.as_bytes()) {
            let section = &rest[cdata..];
            let end = memmem::find(section.as_bytes(), CDATA_CLOSE.as_bytes())
                .map_or(section.len(), |end| end + CDATA_CLOSE.len());
            out.push_str(&rest[..cdata + end]);
            rest = &section[end..];
            continue;
        }

        out.push_str(head);
        if !tail.starts_with(DECL_OPEN) {
            out.push_str("<?");
            rest = &tail[2..];
            continue;
        }
        match memmem::find(tail.as_bytes(), DECL_CLOSE.as_bytes()) {
            Some(end) => rest = &tail[end + DECL_CLOSE.len()..],
            None => {
                // An unterminated declaration swallows the rest of the line.
                rest = tail.find('\n').map_or("", |newline| &tail[newline..]);
            }
        }
    }

    out.push_str(rest);
    out
}

fn escape_bare_ampersands(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(index) = rest.find(['&', '<']) {
        out.push_str(&rest[..index]);
        let tail = &rest[index..];

        if tail.starts_with(CDATA_OPEN) {
            let end = tail
                .find(CDATA_CLOSE)
                .map_or(tail.len(), |end| end + CDATA_CLOSE.len());
            out.push_str(&tail[..end]);
            rest = &tail[end..];
        } else if tail.starts_with('<') {
            out.push('<');
            rest = &tail[1..];
        } else {
            if starts_with_reference(tail) {
                out.push('&');
            } else {
                out.push_str("&amp;");
            }
            rest = &tail[1..];
        }
    }

    out.push_str(rest);
    out
}

fn starts_with_reference(tail: &str) -> bool {
    let Some(end) = tail.find(';') else {
        return false;
    };
    let name = &tail[1..end];

    match name.strip_prefix('#') {
        Some(numeric) => match numeric.strip_prefix(['x', 'X']) {
            Some(hex) => !hex.is_empty() && hex.bytes().all(|byte| byte.is_ascii_hexdigit()),
            None => !numeric.is_empty() && numeric.bytes().all(|byte| byte.is_ascii_digit()),
        },
        None => matches!(name, "amp" | "lt" | "gt" | "quot" | "apos"),
    }
}

/// Escapes text for inclusion in a command body.
#[must_use]
pub fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            other => out.push(other),
        }
    }
    out
}
