use std::{
	collections::HashMap,
	env,
	net::{IpAddr, Ipv4Addr, SocketAddr, UdpSocket},
};

use crate::{Error, Result};

// Connecting a UDP socket only selects a route; nothing is sent.
const ROUTE_PROBE: SocketAddr = SocketAddr::new(IpAddr::V4(Ipv4Addr::new(8, 8, 8, 8)), 80);

/// Address of the interface carrying the default route.
pub fn local_ip_address() -> Result<IpAddr> {
	let socket = UdpSocket::bind(SocketAddr::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), 0))?;

	socket.connect(ROUTE_PROBE)?;

	let ip = socket.local_addr()?.ip();

	if ip.is_unspecified() {
		return Err(Error::Unavailable {
			message: "No routable local network address was found.".to_string(),
		});
	}

	Ok(ip)
}

/// Looks `name` up in `properties`, then in the environment as-is, then as `NAME_WITH_UNDERSCORES`.
pub fn system_property(properties: &HashMap<String, String>, name: &str) -> Option<String> {
	properties
		.get(name)
		.cloned()
		.or_else(|| env::var(name).ok())
		.or_else(|| env::var(env_name(name)).ok())
}

fn env_name(name: &str) -> String {
	name.chars()
		.map(|ch| if ch.is_ascii_alphanumeric() { ch.to_ascii_uppercase() } else { '_' })
		.collect()
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn configured_properties_take_precedence() {
		let properties = HashMap::from([("mqtt.broker.port".to_string(), "8883".to_string())]);

		assert_eq!(system_property(&properties, "mqtt.broker.port").as_deref(), Some("8883"));
	}

	#[test]
	fn unknown_property_is_none() {
		assert_eq!(system_property(&HashMap::new(), "atv.test.property.that.is.never.set"), None);
	}

	#[test]
	fn env_names_are_upper_snake_case() {
		assert_eq!(env_name("mqtt.broker.host"), "MQTT_BROKER_HOST");
	}
}
