//! Header row detection.

/// How a schema finds its column-header row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeaderMode {
    /// The header is the first line containing this signature. Exports may
    /// carry title rows and notes above it.
    ScanForSignature(String),
    /// The source always starts with its header.
    FirstLine,
}

/// Return the 0-based index of the header line, or `None` when scanning
/// finds no signature. `FirstLine` always answers `Some(0)`.
pub fn locate_header<S: AsRef<str>>(lines: &[S], mode: &HeaderMode) -> Option<usize> {
    match mode {
        HeaderMode::FirstLine => Some(0),
        HeaderMode::ScanForSignature(signature) => lines
            .iter()
            .position(|line| line.as_ref().contains(signature.as_str())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scan() -> HeaderMode {
        HeaderMode::ScanForSignature("Event,startDate,endDate".to_string())
    }

    #[test]
    fn finds_signature_below_title_rows() {
        let lines = [
            "2025 Ethereum Events,,,,,,,",
            ",,,,,,,",
            ",Event,startDate,endDate,Geo,Link,Social,Chat",
            ",ETHDenver,23/02/2025,02/03/2025,\"Denver, USA\",ethdenver.com,EthereumDenver,-",
        ];
        assert_eq!(locate_header(&lines, &scan()), Some(2));
    }

    #[test]
    fn first_match_wins() {
        let lines = ["Event,startDate,endDate", "Event,startDate,endDate"];
        assert_eq!(locate_header(&lines, &scan()), Some(0));
    }

    #[test]
    fn missing_signature_is_none() {
        let lines = ["Name,TYPE,Status", "Casa,Bar,OPENING"];
        assert_eq!(locate_header(&lines, &scan()), None);
        let empty: [&str; 0] = [];
        assert_eq!(locate_header(&empty, &scan()), None);
    }

    #[test]
    fn first_line_mode_never_scans() {
        let lines = ["anything", "Event,startDate,endDate"];
        assert_eq!(locate_header(&lines, &HeaderMode::FirstLine), Some(0));
    }
}
