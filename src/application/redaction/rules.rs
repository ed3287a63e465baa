//! Built-in redaction rules
//!
//! Rules are listed in application order. Lower precedence runs first; rules
//! sharing a precedence run in list order.

use std::borrow::Cow;

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use super::{
    RedactionRule, Replacement, ACCESS_KEY_PLACEHOLDER, EMAIL_PLACEHOLDER,
    HOST_PLACEHOLDER, JWT_PLACEHOLDER, PATH_PLACEHOLDER, PREDICATE_PLACEHOLDER,
    STACK_TRACE_PLACEHOLDER, TOKEN_PLACEHOLDER,
};

pub(super) static BUILTIN_RULES: Lazy<Vec<RedactionRule>> = Lazy::new(|| {
    vec![
        // SQL keeps verb and table; the statement body is dropped up to an
        // unquoted `;` or a blank line. Runs before stack traces, which would
        // otherwise take the statement head and leave its continuation lines.
        rule(
            "sql_select",
            5,
            &sql_statement(r#"(?i)\bSELECT\s+(?:(?:[^;\n]|\n[ \t]*[^\s;])+?\s+FROM\s+([\w."`]+))?"#),
            Replacement::With(redact_select),
        ),
        rule(
            "sql_insert",
            6,
            &sql_statement(r#"(?i)\bINSERT\s+INTO\s+([\w."`]+)"#),
            template("INSERT INTO ${1} [VALUES_REDACTED]"),
        ),
        rule(
            "sql_update",
            7,
            &sql_statement(r#"(?i)\bUPDATE\s+([\w."`]+)\s+SET\b"#),
            template("UPDATE ${1} SET [VALUES_REDACTED]"),
        ),
        rule(
            "sql_delete",
            8,
            &sql_statement(r#"(?i)\bDELETE\s+FROM\s+([\w."`]+)"#),
            template("DELETE FROM ${1} [PREDICATE_REDACTED]"),
        ),
        rule(
            "sql_ddl",
            9,
            &sql_statement(r#"(?i)\b(CREATE|ALTER|DROP)\s+((?:UNIQUE\s+)?(?:TABLE|INDEX|VIEW|SEQUENCE|SCHEMA|DATABASE|TYPE|FUNCTION|TRIGGER))\s+(?:IF\s+(?:NOT\s+)?EXISTS\s+)?([\w."`]+)"#),
            template("${1} ${2} ${3} [DDL_REDACTED]"),
        ),
        // Then stack traces: frames embed paths and host:port pairs that
        // must disappear inside one opaque block, not piecemeal.
        rule(
            "stack_trace",
            10,
            r"(?m)(?:goroutine \d+ \[[^\]\n]*\]:|stack backtrace:|Traceback \(most recent call last\):)[^\n]*(?:\n(?:[ \t]+[^\n]*|\S[^\n]*\n[ \t]+[^\n]*))*",
            template(STACK_TRACE_PLACEHOLDER),
        ),
        rule(
            "java_stack_frames",
            10,
            r"(?m)^[ \t]+at [\w$.<>/]+\([^)\n]*\)(?:\n[ \t]+at [\w$.<>/]+\([^)\n]*\))*",
            template(STACK_TRACE_PLACEHOLDER),
        ),
        // Credentials inside URIs before anything can split the URI apart.
        rule(
            "uri_credentials",
            20,
            r"(?i)\b([a-z][a-z0-9+.\-]*)://[^\s:/@]*:\S*@",
            template("${1}://[REDACTED_CREDENTIAL]@"),
        ),
        // Signed tokens before the bearer rule so the whole token goes.
        rule(
            "jwt",
            30,
            r"\beyJ[A-Za-z0-9_\-]{5,}\.[A-Za-z0-9_\-]{5,}\.[A-Za-z0-9_\-]{5,}",
            template(JWT_PLACEHOLDER),
        ),
        rule(
            "aws_access_key",
            40,
            r"\b(?:AKIA|ASIA|AGPA|AIDA|AROA|ANPA|ANVA|AIPA)[A-Z0-9]{16}\b",
            template(ACCESS_KEY_PLACEHOLDER),
        ),
        rule(
            "gcp_api_key",
            40,
            r"\bAIza[0-9A-Za-z_\-]{35}",
            template(ACCESS_KEY_PLACEHOLDER),
        ),
        // Postgres echoes offending row values in DETAIL and HINT lines.
        rule(
            "pg_detail",
            55,
            r"\b(DETAIL|HINT):[^\n]*",
            template("${1}: [DETAIL_REDACTED]"),
        ),
        // An existing placeholder is matched whole so a second pass leaves it
        // alone.
        rule(
            "secret_assignment",
            60,
            r#"(?i)\b([a-z0-9_\-]*(?:password|passwd|passphrase|pwd|secret))(['"]?[ \t]*[=:][ \t]*)(?:'[^']*'|"[^"]*"|\[(?:REDACTED_[A-Z_]+|[A-Z_]+_REDACTED)\]|[^\s'"&,;}]+)"#,
            template("${1}${2}[REDACTED_SECRET]"),
        ),
        rule(
            "bearer_token",
            65,
            r"(?i)\b(bearer)\s+[A-Za-z0-9_\-.~+/]{8,}=*",
            template("${1} [REDACTED_TOKEN]"),
        ),
        rule(
            "token_assignment",
            65,
            r#"(?i)\b([a-z0-9_\-]*(?:api[_\-]?key|token|access[_\-]?key|private[_\-]?key))(['"]?[ \t]*[=:][ \t]*)['"]?[A-Za-z0-9_\-.~+/]{8,}=*['"]?"#,
            template("${1}${2}[REDACTED_TOKEN]"),
        ),
        rule(
            "vendor_token",
            65,
            r"\b(?:sk-|sk_live_|sk_test_|gh[pousr]_|xox[abprs]-)[A-Za-z0-9_\-]{10,}",
            template(TOKEN_PLACEHOLDER),
        ),
        rule(
            "email",
            70,
            r"\b[A-Za-z0-9._%+\-]+@[A-Za-z0-9.\-]+\.[A-Za-z]{2,}\b",
            template(EMAIL_PLACEHOLDER),
        ),
        // The prefix must not be `]`, otherwise a path following a
        // placeholder would be rewritten on a second pass.
        rule(
            "unix_path",
            80,
            r"(^|[^\w/.\]\-])((?:/[\w.@~+\-]+){2,}/?)",
            template("${1}[REDACTED_PATH]"),
        ),
        rule(
            "windows_path",
            80,
            r#"\b[A-Za-z]:\\(?:[^\\\s'"<>|]+\\)*[^\\\s'"<>|]*"#,
            template(PATH_PLACEHOLDER),
        ),
        // Endpoints last: by now paths and URIs no longer contain `host:port`
        // pairs that belong to something else.
        rule(
            "host_port",
            90,
            r"\b(?:(?:[A-Za-z0-9](?:[A-Za-z0-9\-]*[A-Za-z0-9])?\.)+[A-Za-z]{2,}|localhost|(?:\d{1,3}\.){3}\d{1,3}):\d{1,5}\b",
            template(HOST_PLACEHOLDER),
        ),
        rule(
            "ipv6_host_port",
            90,
            r"\[[0-9A-Fa-f:]+\]:\d{1,5}\b",
            template(HOST_PLACEHOLDER),
        ),
        rule(
            "bare_host_port",
            90,
            r"(://|@)[A-Za-z0-9][A-Za-z0-9\-]*:\d{1,5}\b",
            template("${1}[REDACTED_HOST]"),
        ),
    ]
});

fn rule(
    name: &'static str,
    precedence: u16,
    pattern: &str,
    replacement: Replacement,
) -> RedactionRule {
    RedactionRule::new(
        name,
        Regex::new(pattern).expect("Invalid built-in redaction regex"),
        replacement,
        precedence,
    )
}

/// Rest of a SQL statement: quoted literals (which may contain `;` or line
/// breaks, and run to the end of the text when unterminated) and plain
/// characters, continuing onto following lines until a blank one.
const SQL_BODY: &str = r#"(?:'(?:[^']|'')*(?:'|\z)|"[^"]*(?:"|\z)|[^;'"\n]|\n[ \t]*(?:'(?:[^']|'')*(?:'|\z)|"[^"]*(?:"|\z)|[^\s;'"]))*"#;

fn sql_statement(head: &str) -> String {
    format!("{}{}", head, SQL_BODY)
}

fn template(template: &'static str) -> Replacement {
    Replacement::Template(Cow::Borrowed(template))
}

/// `SELECT` without a `FROM` clause is only rewritten when the keyword is
/// literally uppercase, so prose like "select a card" survives.
fn redact_select(caps: &Captures<'_>) -> String {
    match caps.get(1) {
        Some(table) => format!("SELECT ... FROM {} {}", table.as_str(), PREDICATE_PLACEHOLDER),
        None if caps[0].starts_with("SELECT") => format!("SELECT {}", PREDICATE_PLACEHOLDER),
        None => caps[0].to_string(),
    }
}
