// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::sync::Arc;

use common::logging_tracing::{self, PERM_LOG};
use perm_env::MapEnvironment;
use permission_resolver::PermissionCriterionResolver;
use permission_resolver::access_source::RoleAssignmentAccessSource;
use permission_resolver::limitation::LimitationRegistry;
use tracing::Level;

const ACCESS_DOCUMENT: &str = r#"{
    "user": {"user_id": 14},
    "roles": [{
        "identifier": "Editor",
        "policies": [{"module": "content", "function": "read", "limitations": [
            {"identifier": "Section", "values": [1, 3]},
            {"identifier": "Owner", "values": [1]}
        ]}]
    }],
    "assignments": [
        {"role": "Editor", "limitation": {"identifier": "Subtree", "values": ["/1/2/"]}}
    ]
}"#;

#[test]
fn resolves_under_installed_subscriber() {
    let env = MapEnvironment::from([(PERM_LOG, "permission_resolver=debug")]);
    logging_tracing::init(&env).unwrap();

    // The resolver's span and decision events pass the filter read from PERM_LOG
    assert!(tracing::enabled!(target: "permission_resolver::resolver", Level::DEBUG));
    assert!(!tracing::enabled!(target: "permission_resolver::resolver", Level::TRACE));
    assert!(!tracing::enabled!(target: "other_crate", Level::DEBUG));

    let source = RoleAssignmentAccessSource::from_json(ACCESS_DOCUMENT).unwrap();
    let resolver = PermissionCriterionResolver::new(
        Arc::new(source),
        Arc::new(LimitationRegistry::with_builtin_types()),
    );

    let resolved = resolver.resolve("content", "read", None).unwrap();

    assert_eq!(
        resolved.to_string(),
        "filtered by AND(subtree IN ['/1/2/'], AND(section_id IN [1, 3], owner = 14))"
    );
}
