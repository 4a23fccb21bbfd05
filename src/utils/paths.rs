//! Naming of benchmark result files.
//!
//! Every benchmark run writes its artifacts next to each other under a
//! results directory, named after the tunnel under test, the test type
//! and the packet count: `xray_{tunnel}_{test_type}_{count}.{ext}`.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Tunnel implementation under test
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tunnel {
    NepTun,
    LinuxNative,
    WireguardGo,
    BoringTun,
}

impl fmt::Display for Tunnel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::NepTun => "neptun",
            Self::LinuxNative => "native",
            Self::WireguardGo => "wggo",
            Self::BoringTun => "boringtun",
        };
        f.write_str(s)
    }
}

impl FromStr for Tunnel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "neptun" => Ok(Self::NepTun),
            "native" => Ok(Self::LinuxNative),
            "wggo" => Ok(Self::WireguardGo),
            "boringtun" => Ok(Self::BoringTun),
            _ => Err(format!("Unsupported tunnel type '{}'", s)),
        }
    }
}

/// Which side of the tunnel the benchmark drives traffic through
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TestType {
    Crypto,
    Plaintext,
}

impl fmt::Display for TestType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Crypto => "crypto",
            Self::Plaintext => "plaintext",
        };
        f.write_str(s)
    }
}

impl FromStr for TestType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "crypto" => Ok(Self::Crypto),
            "plaintext" => Ok(Self::Plaintext),
            _ => Err(format!("Unsupported test type '{}'", s)),
        }
    }
}

/// Paths of every artifact belonging to one benchmark run
#[derive(Debug, Clone)]
pub struct ResultPaths {
    results_dir: PathBuf,
    base_file_name: String,
}

impl ResultPaths {
    pub fn new(
        results_dir: impl AsRef<Path>,
        tunnel: Tunnel,
        test_type: TestType,
        packet_count: usize,
    ) -> Self {
        Self {
            results_dir: results_dir.as_ref().to_path_buf(),
            base_file_name: format!("xray_{}_{}_{}", tunnel, test_type, packet_count),
        }
    }

    pub fn base(&self) -> PathBuf {
        self.results_dir.join(&self.base_file_name)
    }

    pub fn csv(&self) -> PathBuf {
        self.with_extension("csv")
    }

    pub fn pcap(&self) -> PathBuf {
        self.with_extension("pcap")
    }

    pub fn png(&self) -> PathBuf {
        self.with_extension("png")
    }

    pub fn txt(&self) -> PathBuf {
        self.with_extension("txt")
    }

    pub fn json(&self) -> PathBuf {
        self.with_extension("json")
    }

    fn with_extension(&self, ext: &str) -> PathBuf {
        self.results_dir
            .join(format!("{}.{}", self.base_file_name, ext))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tunnel_round_trips_through_str() {
        for tunnel in [
            Tunnel::NepTun,
            Tunnel::LinuxNative,
            Tunnel::WireguardGo,
            Tunnel::BoringTun,
        ] {
            assert_eq!(tunnel.to_string().parse::<Tunnel>().unwrap(), tunnel);
        }
        assert_eq!("NepTUN".parse::<Tunnel>().unwrap(), Tunnel::NepTun);
        assert!("openvpn".parse::<Tunnel>().is_err());
    }

    #[test]
    fn test_test_type_parsing() {
        assert_eq!("crypto".parse::<TestType>().unwrap(), TestType::Crypto);
        assert_eq!("Plaintext".parse::<TestType>().unwrap(), TestType::Plaintext);
        assert!("udp".parse::<TestType>().is_err());
    }

    #[test]
    fn test_result_paths() {
        let paths = ResultPaths::new("results", Tunnel::WireguardGo, TestType::Crypto, 1000);
        assert_eq!(paths.base(), PathBuf::from("results/xray_wggo_crypto_1000"));
        assert_eq!(paths.csv(), PathBuf::from("results/xray_wggo_crypto_1000.csv"));
        assert_eq!(paths.pcap(), PathBuf::from("results/xray_wggo_crypto_1000.pcap"));
        assert_eq!(paths.png(), PathBuf::from("results/xray_wggo_crypto_1000.png"));
        assert_eq!(paths.txt(), PathBuf::from("results/xray_wggo_crypto_1000.txt"));
        assert_eq!(paths.json(), PathBuf::from("results/xray_wggo_crypto_1000.json"));
    }
}
