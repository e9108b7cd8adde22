#[cfg(test)]
pub mod test {
    use std::io::Cursor;
    use std::path::Path;

    use crate::load::Source;
    use crate::prompt::StdConsole;
    use crate::settings::Settings;

    /// A parsed source; the format follows `name`'s extension.
    pub fn source(name: &str, text: &str) -> Source {
        Source::from_text(Path::new(name), text).unwrap()
    }

    /// Default settings with one tweak applied.
    pub fn settings_with(tweak: impl FnOnce(&mut Settings)) -> Settings {
        let mut settings = Settings::default();
        tweak(&mut settings);
        settings
    }

    /// A console that answers from `input` and records everything shown.
    pub fn console(input: &str) -> StdConsole<Cursor<Vec<u8>>, Vec<u8>> {
        StdConsole::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    /// Everything a test console has shown so far.
    pub fn shown(console: &StdConsole<Cursor<Vec<u8>>, Vec<u8>>) -> String {
        String::from_utf8_lossy(console.output()).into_owned()
    }

    /// A trimmed-down cassandra.yaml pair used by the end-to-end tests.
    pub const OLD_CASSANDRA: &str = "\
cluster_name: 'Prod Cluster'
num_tokens: 256
hinted_handoff_enabled: true
commitlog_sync: periodic
commitlog_sync_period_in_ms: 10000
seed_provider:
  - class_name: org.apache.cassandra.locator.SimpleSeedProvider
    parameters:
      - seeds: \"10.0.0.1,10.0.0.2\"
memtable_flush_writers: 4
thrift_framed_transport_size_in_mb: 15
";

    pub const NEW_CASSANDRA: &str = "\
# Cassandra storage config YAML
cluster_name: 'Test Cluster'
num_tokens: 16
hinted_handoff_enabled: true
commitlog_sync: periodic
commitlog_sync_period_in_ms: 10000
seed_provider:
  - class_name: org.apache.cassandra.locator.SimpleSeedProvider
    parameters:
      - seeds: \"127.0.0.1:7000\"
# memtable_flush_writers: 2
allocate_tokens_for_local_replication_factor: 3
";
}
