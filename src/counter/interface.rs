use std::fs;
use std::path::Path;

use crate::error::Result;

/// Link-layer types (`ARPHRD_*`) reported by `/sys/class/net/<name>/type`
mod arphrd {
    pub const ETHER: u32 = 1;
    pub const TUNNEL: u32 = 768;
    pub const TUNNEL6: u32 = 769;
    pub const LOOPBACK: u32 = 772;
    pub const SIT: u32 = 776;
    pub const IPGRE: u32 = 778;
    pub const IP6GRE: u32 = 823;
    pub const NONE: u32 = 65534;
}

/// Represents the type of network interface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InterfaceType {
    /// Ethernet interface
    Ethernet,
    /// WiFi interface
    WiFi,
    /// Loopback interface
    Loopback,
    /// IP tunnel or headless point-to-point device (tun, wireguard, sit, gre)
    Tunnel,
    /// Other/unknown interface type
    Other,
}

impl InterfaceType {
    fn from_link_type(link_type: u32, wireless: bool) -> Self {
        match link_type {
            arphrd::ETHER if wireless => InterfaceType::WiFi,
            arphrd::ETHER => InterfaceType::Ethernet,
            arphrd::LOOPBACK => InterfaceType::Loopback,
            arphrd::TUNNEL | arphrd::TUNNEL6 | arphrd::SIT | arphrd::IPGRE | arphrd::IP6GRE | arphrd::NONE => {
                InterfaceType::Tunnel
            }
            _ => InterfaceType::Other,
        }
    }

    /// Best guess from the interface name alone, for hosts without sysfs.
    pub fn from_name(name: &str) -> Self {
        if name == "lo" || name.starts_with("lo0") {
            InterfaceType::Loopback
        } else if ["tun", "tap", "wg", "utun", "gif", "stf", "sit", "gre", "ipip"]
            .iter()
            .any(|prefix| name.starts_with(prefix))
        {
            InterfaceType::Tunnel
        } else if name.starts_with("wl") {
            InterfaceType::WiFi
        } else if name.starts_with("en") || name.starts_with("eth") {
            InterfaceType::Ethernet
        } else {
            InterfaceType::Other
        }
    }
}

impl std::fmt::Display for InterfaceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InterfaceType::Ethernet => write!(f, "Ethernet"),
            InterfaceType::WiFi => write!(f, "WiFi"),
            InterfaceType::Loopback => write!(f, "Loopback"),
            InterfaceType::Tunnel => write!(f, "Tunnel"),
            InterfaceType::Other => write!(f, "Other"),
        }
    }
}

/// A network interface as enumerated by the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Interface {
    /// Name of the interface (e.g., "eth0", "lo")
    name: String,

    /// Type of interface
    interface_type: InterfaceType,

    /// Whether the operational state is "up"
    is_up: bool,

    /// Kernel index; enumeration order
    index: u32,
}

impl Interface {
    pub fn new(name: impl Into<String>, interface_type: InterfaceType, is_up: bool, index: u32) -> Self {
        Self {
            name: name.into(),
            interface_type,
            is_up,
            index,
        }
    }

    /// Get the name of this interface
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the type of this interface
    pub fn interface_type(&self) -> InterfaceType {
        self.interface_type
    }

    pub fn is_up(&self) -> bool {
        self.is_up
    }

    pub fn index(&self) -> u32 {
        self.index
    }

    /// Gets whether this is a loopback interface.
    pub fn is_loopback(&self) -> bool {
        self.interface_type == InterfaceType::Loopback
    }

    pub fn is_tunnel(&self) -> bool {
        self.interface_type == InterfaceType::Tunnel
    }

    /// Whether this interface carries the host's real traffic.
    pub fn is_active(&self) -> bool {
        self.is_up && !self.is_loopback() && !self.is_tunnel()
    }
}

/// Enumerates interfaces under `<sysfs_root>/class/net`, ordered by kernel index.
pub fn enumerate(sysfs_root: &Path) -> Result<Vec<Interface>> {
    let class_net = sysfs_root.join("class").join("net");
    let mut interfaces = Vec::new();

    for entry in fs::read_dir(&class_net)? {
        let entry = entry?;
        let name = entry.file_name().to_string_lossy().into_owned();
        let dir = entry.path();

        let link_type = read_trimmed(&dir.join("type")).and_then(|raw| raw.parse::<u32>().ok());
        let wireless = dir.join("wireless").exists() || dir.join("phy80211").exists();
        let interface_type = match link_type {
            Some(link_type) => InterfaceType::from_link_type(link_type, wireless),
            None => InterfaceType::from_name(&name),
        };
        let is_up = read_trimmed(&dir.join("operstate")).is_some_and(|state| state == "up");
        let index = read_trimmed(&dir.join("ifindex"))
            .and_then(|raw| raw.parse::<u32>().ok())
            .unwrap_or(u32::MAX);

        interfaces.push(Interface::new(name, interface_type, is_up, index));
    }

    interfaces.sort_by(|a, b| a.index.cmp(&b.index).then_with(|| a.name.cmp(&b.name)));
    Ok(interfaces)
}

/// The first active interface in enumeration order.
pub fn first_active(interfaces: &[Interface]) -> Option<&Interface> {
    interfaces.iter().find(|interface| interface.is_active())
}

/// Resolves the active interface name from sysfs, if sysfs is present.
pub fn active_interface_name(sysfs_root: &Path) -> Option<String> {
    let interfaces = enumerate(sysfs_root).ok()?;
    first_active(&interfaces).map(|interface| interface.name().to_string())
}

fn read_trimmed(path: &Path) -> Option<String> {
    fs::read_to_string(path).ok().map(|raw| raw.trim().to_string())
}
