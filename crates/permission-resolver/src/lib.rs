// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

//! Resolves a user's permissions into criteria that a query layer can use to filter content.
//!
//! The [`PermissionCriterionResolver`] consumes two collaborators: an
//! [`AccessSource`](access_source::AccessSource) that knows what the current user has been
//! granted, and a [`LimitationRegistry`](limitation::LimitationRegistry) that translates each
//! limitation into a criterion.

pub mod access_source;
pub mod config;
pub mod limitation;

mod error;
mod resolver;

pub use error::PermissionCriterionError;
pub use resolver::PermissionCriterionResolver;
