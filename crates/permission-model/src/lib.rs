// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

//! Values exchanged by the permission resolver: what a user has been granted (permission sets,
//! policies, limitations) and what the resolver hands to the query layer (criteria).

pub mod criterion;
pub mod limitation;
pub mod policy;
pub mod target;
pub mod user;

pub use criterion::{Criterion, PermissionCriterion};
pub use limitation::{Limitation, LimitationValue};
pub use policy::{PermissionSet, Policy};
pub use target::Target;
pub use user::UserReference;
