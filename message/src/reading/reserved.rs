//! Responses whose payloads are not understood yet. They are carried as raw bytes.

use crate::layout::{
    Field,
    PayloadLayout,
};

const SET_TEMP_RANGE_FIELDS: &[Field] = &[Field::bytes("_r", 0, 24)];
pub const SET_TEMP_RANGE_LAYOUT: PayloadLayout = PayloadLayout::new(24, SET_TEMP_RANGE_FIELDS);

const CONTROL_CONFIG_2_FIELDS: &[Field] = &[Field::bytes("_r", 0, 6)];
pub const CONTROL_CONFIG_2_LAYOUT: PayloadLayout = PayloadLayout::new(6, CONTROL_CONFIG_2_FIELDS);

const CONFIG_FIELDS: &[Field] = &[Field::bytes("_r", 0, 25)];
pub const CONFIG_LAYOUT: PayloadLayout = PayloadLayout::new(25, CONFIG_FIELDS);
