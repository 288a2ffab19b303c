//! Streaming row readers over tab-separated input files.
//!
//! Rows are consumed lazily so large workflow exports never have to fit in
//! memory. Blank lines are skipped; a row shorter than the header requires
//! is an error naming the line number.

use std::io::BufRead;

use super::{ColumnSpec, ConnectionRecord, HeaderMap, RecordError, ToolIoRecord};

/// Shared line-splitting core for the typed readers.
#[derive(Debug)]
struct Rows<R: BufRead> {
    file: String,
    header: HeaderMap,
    reader: R,
    line: usize,
}

impl<R: BufRead> Rows<R> {
    fn new(file: &str, mut reader: R, spec: &ColumnSpec) -> Result<Self, RecordError> {
        let mut header_row = String::new();
        let read = reader.read_line(&mut header_row).map_err(|source| {
            RecordError::Io {
                file: file.to_string(),
                source,
            }
        })?;
        if read == 0 {
            return Err(RecordError::EmptyFile {
                file: file.to_string(),
            });
        }

        let header = HeaderMap::resolve(file, header_row.trim_end_matches(['\r', '\n']), spec)?;
        Ok(Self {
            file: file.to_string(),
            header,
            reader,
            line: 1,
        })
    }

    /// Next non-blank data row, split into fields.
    fn next_fields(&mut self) -> Option<Result<Vec<String>, RecordError>> {
        loop {
            let mut raw = String::new();
            match self.reader.read_line(&mut raw) {
                Ok(0) => return None,
                Ok(_) => {}
                Err(source) => {
                    return Some(Err(RecordError::Io {
                        file: self.file.clone(),
                        source,
                    }))
                }
            }
            self.line += 1;

            let row = raw.trim_end_matches(['\r', '\n']);
            if row.trim().is_empty() {
                continue;
            }

            let fields: Vec<String> = row.split('\t').map(str::to_string).collect();
            if fields.len() < self.header.required_width() {
                return Some(Err(RecordError::ShortRow {
                    file: self.file.clone(),
                    line: self.line,
                    found: fields.len(),
                    required: self.header.required_width(),
                }));
            }
            return Some(Ok(fields));
        }
    }
}

/// Streaming reader for tool-inputs / tool-outputs files.
#[derive(Debug)]
pub struct ToolIoReader<R: BufRead> {
    rows: Rows<R>,
}

impl<R: BufRead> ToolIoReader<R> {
    /// Open a reader with the default tool-I/O column names.
    pub fn new(file: &str, reader: R) -> Result<Self, RecordError> {
        Self::with_spec(file, reader, &ColumnSpec::tool_io())
    }

    /// Open a reader with a caller-supplied role-to-column mapping.
    pub fn with_spec(file: &str, reader: R, spec: &ColumnSpec) -> Result<Self, RecordError> {
        Ok(Self {
            rows: Rows::new(file, reader, spec)?,
        })
    }
}

impl<R: BufRead> Iterator for ToolIoReader<R> {
    type Item = Result<ToolIoRecord, RecordError>;

    fn next(&mut self) -> Option<Self::Item> {
        let fields = match self.rows.next_fields()? {
            Ok(fields) => fields,
            Err(err) => return Some(Err(err)),
        };
        Some(Ok(ToolIoRecord::from_row(&self.rows.header, &fields)))
    }
}

/// Streaming reader for workflow-connections files.
pub struct ConnectionReader<R: BufRead> {
    rows: Rows<R>,
}

impl<R: BufRead> ConnectionReader<R> {
    /// Open a reader with the default connection column names.
    pub fn new(file: &str, reader: R) -> Result<Self, RecordError> {
        Self::with_spec(file, reader, &ColumnSpec::connections())
    }

    /// Open a reader with a caller-supplied role-to-column mapping.
    pub fn with_spec(file: &str, reader: R, spec: &ColumnSpec) -> Result<Self, RecordError> {
        Ok(Self {
            rows: Rows::new(file, reader, spec)?,
        })
    }
}

impl<R: BufRead> Iterator for ConnectionReader<R> {
    type Item = Result<ConnectionRecord, RecordError>;

    fn next(&mut self) -> Option<Self::Item> {
        let fields = match self.rows.next_fields()? {
            Ok(fields) => fields,
            Err(err) => return Some(Err(err)),
        };
        Some(Ok(ConnectionRecord::from_row(&self.rows.header, &fields)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const TOOL_IO: &str = "tool\tversion\tslot\tdatatype\tedam_format\n\
        cutadapt\t1.0\ttrimmed\tfastq\tformat_1930\n\
        \n\
        bowtie2\t2.2\talignments\tbam\t\n";

    #[test]
    fn reads_and_trims_rows() {
        let mut reader = ToolIoReader::new("io.tsv", Cursor::new(TOOL_IO)).unwrap();

        let first = reader.next().unwrap().unwrap();
        assert_eq!(first.tool, "cutadapt");
        assert_eq!(first.edam_format.as_deref(), Some("format_1930"));

        // Blank line is skipped, empty edam column becomes None.
        let second = reader.next().unwrap().unwrap();
        assert_eq!(second.tool, "bowtie2");
        assert_eq!(second.edam_format, None);

        assert!(reader.next().is_none());
    }

    #[test]
    fn short_row_reports_line_number() {
        let data = "tool\tversion\tslot\tdatatype\tedam_format\ncutadapt\t1.0\n";
        let mut reader = ToolIoReader::new("io.tsv", Cursor::new(data)).unwrap();
        match reader.next().unwrap().unwrap_err() {
            RecordError::ShortRow { line, found, required, .. } => {
                assert_eq!(line, 2);
                assert_eq!(found, 2);
                assert_eq!(required, 5);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn empty_file_is_rejected() {
        let err = ToolIoReader::new("io.tsv", Cursor::new("")).unwrap_err();
        assert!(matches!(err, RecordError::EmptyFile { .. }));
    }

    #[test]
    fn connection_rows_resolve_by_header_name() {
        let data = "out_tool\tout_tool_version\ttool_inputs\twf_id\tin_tool\tin_tool_version\ttool_outputs\n\
            bowtie2\t2.2\treads\twf-17\tcutadapt\t1.0\ttrimmed\n";
        let mut reader = ConnectionReader::new("wf.tsv", Cursor::new(data)).unwrap();
        let rec = reader.next().unwrap().unwrap();
        assert_eq!(rec.workflow_id, "wf-17");
        assert_eq!(rec.source_tool, "cutadapt");
        assert_eq!(rec.source_output, "trimmed");
        assert_eq!(rec.target_tool, "bowtie2");
        assert_eq!(rec.target_input, "reads");
    }
}
