// ============================================================
// Layer 6 — HTTP Client
// ============================================================
// One shared ureq agent with fixed timeouts, plus a helper that
// streams a response body to a writer while enforcing a size cap.

use std::io::{self, Read, Write};
use std::sync::OnceLock;
use std::time::Duration;

const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
const READ_TIMEOUT:    Duration = Duration::from_secs(60);

/// Return the process-wide HTTP agent.
pub fn agent() -> &'static ureq::Agent {
    static AGENT: OnceLock<ureq::Agent> = OnceLock::new();
    AGENT.get_or_init(|| {
        ureq::AgentBuilder::new()
            .timeout_connect(CONNECT_TIMEOUT)
            .timeout_read(READ_TIMEOUT)
            .build()
    })
}

/// Stream `response` into `writer`, failing once more than `max_bytes` arrive.
/// Returns the number of bytes written.
pub fn copy_response_to_writer(
    response:  ureq::Response,
    writer:    &mut impl Write,
    max_bytes: u64,
) -> io::Result<u64> {
    if let Some(length) = response
        .header("Content-Length")
        .and_then(|l| l.parse::<u64>().ok())
    {
        if length > max_bytes {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!("Response too large: {length} bytes"),
            ));
        }
    }

    let mut limited = response.into_reader().take(max_bytes + 1);
    let written = io::copy(&mut limited, writer)?;
    if written > max_bytes {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            format!("Response exceeded {max_bytes} bytes"),
        ));
    }
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_copies_body_within_limit() {
        let response = ureq::Response::new(200, "OK", "0123456789").unwrap();
        let mut out = Vec::new();
        assert_eq!(copy_response_to_writer(response, &mut out, 10).unwrap(), 10);
        assert_eq!(out, b"0123456789");
    }

    #[test]
    fn test_streamed_body_over_limit_fails() {
        // No Content-Length: the cap is hit while copying
        let response = ureq::Response::new(200, "OK", "0123456789ABCDEF").unwrap();
        let mut out = Vec::new();
        let err = copy_response_to_writer(response, &mut out, 10).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
        assert!(err.to_string().contains("exceeded 10 bytes"));
    }

    #[test]
    fn test_declared_length_over_limit_fails_before_reading() {
        let response: ureq::Response =
            "HTTP/1.1 200 OK\r\nContent-Length: 16\r\n\r\n0123456789ABCDEF"
                .parse()
                .unwrap();
        let mut out = Vec::new();
        let err = copy_response_to_writer(response, &mut out, 10).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
        assert!(err.to_string().contains("too large: 16 bytes"));
        assert!(out.is_empty());
    }
}
