//! Controller enumeration

use anyhow::Result;
use padlink_engine::hid::create_transport_port;
use padlink_engine::{ControllerFamily, DeviceInfo, TransportPort};
use tracing::debug;

use crate::error::CliError;
use crate::output::{self, ListedController};

pub fn execute(json: bool) -> Result<()> {
    let port = create_transport_port().map_err(|e| CliError::TransportUnavailable(e.to_string()))?;
    let controllers = supported_controllers(port.as_ref())?;
    output::print_controller_list(&controllers, json);
    Ok(())
}

/// Enumerated devices that belong to a supported family, one entry per path.
pub fn supported_controllers(port: &dyn TransportPort) -> Result<Vec<ListedController>> {
    let devices = port
        .list()
        .map_err(|e| CliError::TransportUnavailable(e.to_string()))?;
    Ok(classify(devices))
}

fn classify(devices: Vec<DeviceInfo>) -> Vec<ListedController> {
    let mut controllers: Vec<ListedController> = Vec::new();
    for device in devices {
        let Some(family) = ControllerFamily::identify(device.vendor_id, device.product_id) else {
            continue;
        };
        if controllers.iter().any(|known| known.path == device.path) {
            continue;
        }
        debug!(%family, path = %device.path, "Supported controller");
        controllers.push(ListedController {
            family,
            name: device.display_name(),
            vendor_id: device.vendor_id,
            product_id: device.product_id,
            connection_type: device.connection_type,
            path: device.path,
        });
    }
    controllers.sort_by_key(|c| {
        ControllerFamily::ALL
            .iter()
            .position(|f| *f == c.family)
            .unwrap_or(usize::MAX)
    });
    controllers
}
