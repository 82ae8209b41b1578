//! Tests for the relation lifecycle primitives.

mod indexes;

use cairn_test_utils::{introspect, TestContext, TestError};

use crate::data::relation;
use crate::error::{store::StoreError, ImportError};
