//! Example: Parse a dhcpd.conf to a tree and navigate it.
//!
//! Run with: cargo run --example tree_parse

use isccfg_core::{parse, ConfigNode};

fn main() {
    let input = br#"# Global settings
authoritative;
option domain-name "example.org";
option domain-name-servers ns1.example.org, ns2.example.org;

subnet 10.5.5.0 netmask 255.255.255.224 {
  range 10.5.5.26 10.5.5.30;
  option routers 10.5.5.1;
}

host fantasia {
  fixed-address fantasia.example.com;
}
"#;

    let root = parse(input).expect("parse failed");

    println!("=== Configuration Tree ===\n");
    print_node("(root)", &root, 0);

    println!("\n=== Lookups ===\n");
    if let Ok(servers) = root.lookup(&["option", "domain-name-servers"]) {
        println!("name servers: {:?}", servers.values());
    }
    if let Ok(hosts) = root.child("host") {
        for (name, host) in hosts.children() {
            println!("host {} -> {:?}", name, host.unroll());
        }
    }

    println!("\n=== Leaf Paths ===\n");
    root.walk(|path, node| {
        if !node.values().is_empty() {
            println!("{} = {:?}", path.join(" "), node.values());
        }
    });
}

fn print_node(name: &str, node: &ConfigNode, depth: usize) {
    let indent = "  ".repeat(depth);
    if node.values().is_empty() {
        println!("{}{}", indent, name);
    } else {
        println!("{}{} {:?}", indent, name, node.values());
    }
    for (child_name, child) in node.children() {
        print_node(child_name, child, depth + 1);
    }
}
