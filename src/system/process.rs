use super::ParseError;

/// One row of the process table, as reported by the collector.
/// Constructed during parsing and not mutated after publish.
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessRecord {
    pub pid: String,
    pub image_name: String,
    pub session_name: String,
    pub session_number: String,
    /// Working-set size in kibibytes.
    pub mem_usage_kib: u64,
    pub status: String,
    pub user_name: String,
    /// Accumulated processor time in whole seconds.
    pub cpu_time_secs: u64,
    /// This record's share of the snapshot's total processor time, in [0, 1].
    pub cpu_share: f64,
    pub window_title: String,
}

/// The process records produced by one sampler tick, in collector order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    pub records: Vec<ProcessRecord>,
}

impl Snapshot {
    /// Parses the CSV process table. The first non-empty line must be the
    /// header; every data row must carry all required columns.
    pub fn parse(output: &str) -> Result<Self, ParseError> {
        let mut lines = output.lines().filter(|line| !line.trim().is_empty());
        let header = split_csv_row(lines.next().unwrap_or(""));
        let columns = ColumnIndex::resolve(&header)?;
        let mut records = Vec::new();
        for line in lines {
            records.push(columns.record(&split_csv_row(line))?);
        }
        Ok(Snapshot { records })
    }

    /// Sets every record's share of the snapshot's total processor time,
    /// rounded to two decimals. A zero total yields zero shares, not an
    /// error.
    pub fn assign_cpu_shares(&mut self) {
        let total: u64 = self.records.iter().map(|r| r.cpu_time_secs).sum();
        for record in &mut self.records {
            record.cpu_share = if total == 0 {
                0.0
            } else {
                round2(record.cpu_time_secs as f64 / total as f64)
            };
        }
    }

    /// Sorts records by memory usage, largest first. Ties keep collector
    /// order.
    pub fn sort_by_memory(&mut self) {
        self.records.sort_by(|a, b| b.mem_usage_kib.cmp(&a.mem_usage_kib));
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

struct ColumnIndex {
    image_name: usize,
    pid: usize,
    session_name: usize,
    session_number: usize,
    mem_usage: usize,
    status: usize,
    user_name: usize,
    cpu_time: usize,
    window_title: usize,
}

impl ColumnIndex {
    fn resolve(header: &[String]) -> Result<Self, ParseError> {
        let position = |name: &'static str| {
            header
                .iter()
                .position(|column| column == name)
                .ok_or(ParseError::MissingColumn(name))
        };
        Ok(Self {
            image_name: position("Image Name")?,
            pid: position("PID")?,
            session_name: position("Session Name")?,
            session_number: position("Session#")?,
            mem_usage: position("Mem Usage")?,
            status: position("Status")?,
            user_name: position("User Name")?,
            cpu_time: position("CPU Time")?,
            window_title: position("Window Title")?,
        })
    }

    fn record(&self, fields: &[String]) -> Result<ProcessRecord, ParseError> {
        let field = |index: usize, name: &'static str| {
            fields
                .get(index)
                .cloned()
                .ok_or(ParseError::MissingField(name))
        };
        Ok(ProcessRecord {
            pid: field(self.pid, "PID")?,
            image_name: field(self.image_name, "Image Name")?,
            session_name: field(self.session_name, "Session Name")?,
            session_number: field(self.session_number, "Session#")?,
            mem_usage_kib: parse_mem_usage(&field(self.mem_usage, "Mem Usage")?)?,
            status: field(self.status, "Status")?,
            user_name: field(self.user_name, "User Name")?,
            cpu_time_secs: parse_cpu_time(&field(self.cpu_time, "CPU Time")?)?,
            cpu_share: 0.0,
            window_title: field(self.window_title, "Window Title")?,
        })
    }
}

/// Splits one line of the quoted-CSV process table. Embedded quotes arrive
/// doubled.
fn split_csv_row(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();
    while let Some(ch) = chars.next() {
        match ch {
            '"' if in_quotes && chars.peek() == Some(&'"') => {
                current.push('"');
                chars.next();
            }
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => fields.push(std::mem::take(&mut current)),
            _ => current.push(ch),
        }
    }
    fields.push(current);
    fields
}

/// Strips the `" K"` suffix and thousands separators from a memory cell,
/// e.g. `"12,345 K"` -> 12345.
pub fn parse_mem_usage(text: &str) -> Result<u64, ParseError> {
    let digits = text.trim().trim_end_matches(" K").replace(',', "");
    digits.parse().map_err(|_| ParseError::InvalidNumber {
        field: "Mem Usage",
        value: text.to_string(),
    })
}

/// Converts an `H:MM:SS` processor-time cell into whole seconds.
pub fn parse_cpu_time(text: &str) -> Result<u64, ParseError> {
    let invalid = || ParseError::InvalidNumber {
        field: "CPU Time",
        value: text.to_string(),
    };
    let segments: Vec<&str> = text.trim().split(':').collect();
    let &[hours, minutes, seconds] = segments.as_slice() else {
        return Err(invalid());
    };
    let parse = |segment: &str| segment.parse::<u64>().map_err(|_| invalid());
    Ok(parse(hours)? * 3600 + parse(minutes)? * 60 + parse(seconds)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = concat!(
        "\"Image Name\",\"PID\",\"Session Name\",\"Session#\",\"Mem Usage\",",
        "\"Status\",\"User Name\",\"CPU Time\",\"Window Title\"\n",
        "\"System Idle Process\",\"0\",\"Services\",\"0\",\"8 K\",\"Unknown\",",
        "\"NT AUTHORITY\\SYSTEM\",\"71:10:20\",\"N/A\"\n",
        "\"csrss.exe\",\"640\",\"Services\",\"0\",\"5,484 K\",\"Unknown\",",
        "\"NT AUTHORITY\\SYSTEM\",\"0:00:12\",\"N/A\"\n",
        "\"notepad.exe\",\"4280\",\"Console\",\"1\",\"13,812 K\",\"Running\",",
        "\"HOST\\paul\",\"0:00:01\",\"Untitled - Notepad\"\n",
    );

    #[test]
    fn parses_one_record_per_data_row() {
        let snapshot = Snapshot::parse(SAMPLE).unwrap();
        assert_eq!(snapshot.records.len(), 3);

        let csrss = &snapshot.records[1];
        assert_eq!(csrss.pid, "640");
        assert_eq!(csrss.image_name, "csrss.exe");
        assert_eq!(csrss.mem_usage_kib, 5484);
        assert_eq!(csrss.cpu_time_secs, 12);
        assert_eq!(csrss.user_name, "NT AUTHORITY\\SYSTEM");
        assert_eq!(csrss.window_title, "N/A");
    }

    #[test]
    fn parses_hours_minutes_seconds() {
        assert_eq!(parse_cpu_time("71:10:20").unwrap(), 71 * 3600 + 10 * 60 + 20);
        assert_eq!(parse_cpu_time("0:00:00").unwrap(), 0);
        assert!(parse_cpu_time("0:00").is_err());
        assert!(parse_cpu_time("0:aa:00").is_err());
    }

    #[test]
    fn parses_grouped_memory_cells() {
        assert_eq!(parse_mem_usage("8 K").unwrap(), 8);
        assert_eq!(parse_mem_usage("12,345 K").unwrap(), 12345);
        assert!(parse_mem_usage("lots").is_err());
    }

    #[test]
    fn quoted_commas_stay_inside_fields() {
        let fields = split_csv_row("\"a, b\",\"c\"\"d\",\"e\"");
        assert_eq!(fields, vec!["a, b", "c\"d", "e"]);
    }

    #[test]
    fn missing_column_is_a_parse_error() {
        let output = "\"Image Name\",\"PID\"\n\"csrss.exe\",\"640\"\n";
        assert_eq!(
            Snapshot::parse(output),
            Err(ParseError::MissingColumn("Session Name"))
        );
    }

    #[test]
    fn short_row_is_a_parse_error() {
        let mut output = SAMPLE.to_string();
        output.push_str("\"stub.exe\",\"99\"\n");
        assert_eq!(
            Snapshot::parse(&output),
            Err(ParseError::MissingField("Session Name"))
        );
    }

    #[test]
    fn shares_split_the_snapshot_total() {
        let mut snapshot = Snapshot::parse(SAMPLE).unwrap();
        snapshot.assign_cpu_shares();
        // Idle dominates: 256220 of 256233 seconds.
        assert_eq!(snapshot.records[0].cpu_share, 1.0);
        assert_eq!(snapshot.records[1].cpu_share, 0.0);
        let sum: f64 = snapshot.records.iter().map(|r| r.cpu_share).sum();
        assert!(sum <= 1.0 + 0.01 * snapshot.records.len() as f64);
    }

    #[test]
    fn zero_total_means_zero_shares() {
        let mut snapshot = Snapshot::parse(SAMPLE).unwrap();
        for record in &mut snapshot.records {
            record.cpu_time_secs = 0;
        }
        snapshot.assign_cpu_shares();
        assert!(snapshot.records.iter().all(|r| r.cpu_share == 0.0));
    }

    #[test]
    fn memory_sort_is_descending_and_stable() {
        let mut snapshot = Snapshot::parse(SAMPLE).unwrap();
        // Give two records the same memory usage; they must keep their
        // collector order relative to each other.
        snapshot.records[0].mem_usage_kib = 5484;
        snapshot.sort_by_memory();
        let names: Vec<&str> = snapshot
            .records
            .iter()
            .map(|r| r.image_name.as_str())
            .collect();
        assert_eq!(names, vec!["notepad.exe", "System Idle Process", "csrss.exe"]);
    }
}
