//! OCPP 1.6 enumerations and composite types
//!
//! Field names, enum strings and string bounds follow the OCPP 1.6 JSON
//! schemas; the SOAP binding uses the same names as child elements.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::common::{CiString20, CiString50, CiString500, Decimal, Validate};
use crate::error::{ParseError, ValidationError};
use crate::xml::{XmlCodec, XmlElement};

/// Identifier of an authorization token (`IdToken`, CiString20Type)
pub type IdToken = CiString20;

// ============================================================================
// Enumerations
// ============================================================================

wire_enum! {
    /// Status of an id tag in an `IdTagInfo`
    pub enum AuthorizationStatus {
        Accepted => "Accepted",
        Blocked => "Blocked",
        Expired => "Expired",
        Invalid => "Invalid",
        ConcurrentTx => "ConcurrentTx",
    }
}

wire_enum! {
    /// Registration status for BootNotification
    pub enum RegistrationStatus {
        Accepted => "Accepted",
        Pending => "Pending",
        Rejected => "Rejected",
    }
}

wire_enum! {
    pub enum DataTransferStatus {
        Accepted => "Accepted",
        Rejected => "Rejected",
        UnknownMessageId => "UnknownMessageId",
        UnknownVendorId => "UnknownVendorId",
    }
}

wire_enum! {
    pub enum DiagnosticsStatus {
        Idle => "Idle",
        Uploaded => "Uploaded",
        UploadFailed => "UploadFailed",
        Uploading => "Uploading",
    }
}

wire_enum! {
    pub enum FirmwareStatus {
        Downloaded => "Downloaded",
        DownloadFailed => "DownloadFailed",
        Downloading => "Downloading",
        Idle => "Idle",
        InstallationFailed => "InstallationFailed",
        Installing => "Installing",
        Installed => "Installed",
    }
}

wire_enum! {
    /// Reading context for sampled values
    pub enum ReadingContext {
        InterruptionBegin => "Interruption.Begin",
        InterruptionEnd => "Interruption.End",
        Other => "Other",
        SampleClock => "Sample.Clock",
        SamplePeriodic => "Sample.Periodic",
        TransactionBegin => "Transaction.Begin",
        TransactionEnd => "Transaction.End",
        Trigger => "Trigger",
    }
}

wire_enum! {
    pub enum ValueFormat {
        Raw => "Raw",
        SignedData => "SignedData",
    }
}

wire_enum! {
    /// Measurand types for meter values
    pub enum Measurand {
        CurrentExport => "Current.Export",
        CurrentImport => "Current.Import",
        CurrentOffered => "Current.Offered",
        EnergyActiveExportRegister => "Energy.Active.Export.Register",
        EnergyActiveImportRegister => "Energy.Active.Import.Register",
        EnergyReactiveExportRegister => "Energy.Reactive.Export.Register",
        EnergyReactiveImportRegister => "Energy.Reactive.Import.Register",
        EnergyActiveExportInterval => "Energy.Active.Export.Interval",
        EnergyActiveImportInterval => "Energy.Active.Import.Interval",
        EnergyReactiveExportInterval => "Energy.Reactive.Export.Interval",
        EnergyReactiveImportInterval => "Energy.Reactive.Import.Interval",
        Frequency => "Frequency",
        PowerActiveExport => "Power.Active.Export",
        PowerActiveImport => "Power.Active.Import",
        PowerFactor => "Power.Factor",
        PowerOffered => "Power.Offered",
        PowerReactiveExport => "Power.Reactive.Export",
        PowerReactiveImport => "Power.Reactive.Import",
        Rpm => "RPM",
        SoC => "SoC",
        Temperature => "Temperature",
        Voltage => "Voltage",
    }
}

wire_enum! {
    pub enum Phase {
        L1 => "L1",
        L2 => "L2",
        L3 => "L3",
        N => "N",
        L1N => "L1-N",
        L2N => "L2-N",
        L3N => "L3-N",
        L1L2 => "L1-L2",
        L2L3 => "L2-L3",
        L3L1 => "L3-L1",
    }
}

wire_enum! {
    pub enum Location {
        Body => "Body",
        Cable => "Cable",
        Ev => "EV",
        Inlet => "Inlet",
        Outlet => "Outlet",
    }
}

wire_enum! {
    /// Unit of measure for sampled values
    pub enum UnitOfMeasure {
        Wh => "Wh",
        KWh => "kWh",
        Varh => "varh",
        KVarh => "kvarh",
        W => "W",
        KW => "kW",
        Va => "VA",
        KVa => "kVA",
        Var => "var",
        KVar => "kvar",
        A => "A",
        V => "V",
        /// The 1.6 schema spells it `Celcius`; both are read
        Celsius => "Celsius" | "Celcius",
        Fahrenheit => "Fahrenheit",
        K => "K",
        Percent => "Percent",
    }
}

wire_enum! {
    pub enum ChargePointErrorCode {
        ConnectorLockFailure => "ConnectorLockFailure",
        EvCommunicationError => "EVCommunicationError",
        GroundFailure => "GroundFailure",
        HighTemperature => "HighTemperature",
        InternalError => "InternalError",
        LocalListConflict => "LocalListConflict",
        NoError => "NoError",
        OtherError => "OtherError",
        OverCurrentFailure => "OverCurrentFailure",
        OverVoltage => "OverVoltage",
        PowerMeterFailure => "PowerMeterFailure",
        PowerSwitchFailure => "PowerSwitchFailure",
        ReaderFailure => "ReaderFailure",
        ResetFailure => "ResetFailure",
        UnderVoltage => "UnderVoltage",
        WeakSignal => "WeakSignal",
    }
}

wire_enum! {
    /// Connector / charge point status
    pub enum ChargePointStatus {
        Available => "Available",
        Preparing => "Preparing",
        Charging => "Charging",
        SuspendedEvse => "SuspendedEVSE",
        SuspendedEv => "SuspendedEV",
        Finishing => "Finishing",
        Reserved => "Reserved",
        Unavailable => "Unavailable",
        Faulted => "Faulted",
    }
}

wire_enum! {
    /// Why a transaction stopped
    pub enum Reason {
        DeAuthorized => "DeAuthorized",
        EmergencyStop => "EmergencyStop",
        EvDisconnected => "EVDisconnected",
        HardReset => "HardReset",
        Local => "Local",
        Other => "Other",
        PowerLoss => "PowerLoss",
        Reboot => "Reboot",
        Remote => "Remote",
        SoftReset => "SoftReset",
        UnlockCommand => "UnlockCommand",
    }
}

wire_enum! {
    pub enum CancelReservationStatus {
        Accepted => "Accepted",
        Rejected => "Rejected",
    }
}

wire_enum! {
    pub enum AvailabilityType {
        Inoperative => "Inoperative",
        Operative => "Operative",
    }
}

wire_enum! {
    pub enum AvailabilityStatus {
        Accepted => "Accepted",
        Rejected => "Rejected",
        Scheduled => "Scheduled",
    }
}

wire_enum! {
    pub enum ConfigurationStatus {
        Accepted => "Accepted",
        Rejected => "Rejected",
        RebootRequired => "RebootRequired",
        NotSupported => "NotSupported",
    }
}

wire_enum! {
    pub enum ClearCacheStatus {
        Accepted => "Accepted",
        Rejected => "Rejected",
    }
}

wire_enum! {
    pub enum ChargingProfilePurpose {
        ChargePointMaxProfile => "ChargePointMaxProfile",
        TxDefaultProfile => "TxDefaultProfile",
        TxProfile => "TxProfile",
    }
}

wire_enum! {
    pub enum ChargingProfileKind {
        Absolute => "Absolute",
        Recurring => "Recurring",
        Relative => "Relative",
    }
}

wire_enum! {
    pub enum RecurrencyKind {
        Daily => "Daily",
        Weekly => "Weekly",
    }
}

wire_enum! {
    pub enum ChargingRateUnit {
        W => "W",
        A => "A",
    }
}

wire_enum! {
    pub enum ClearChargingProfileStatus {
        Accepted => "Accepted",
        Unknown => "Unknown",
    }
}

wire_enum! {
    pub enum GetCompositeScheduleStatus {
        Accepted => "Accepted",
        Rejected => "Rejected",
    }
}

wire_enum! {
    pub enum RemoteStartStopStatus {
        Accepted => "Accepted",
        Rejected => "Rejected",
    }
}

wire_enum! {
    pub enum ReservationStatus {
        Accepted => "Accepted",
        Faulted => "Faulted",
        Occupied => "Occupied",
        Rejected => "Rejected",
        Unavailable => "Unavailable",
    }
}

wire_enum! {
    pub enum ResetType {
        Hard => "Hard",
        Soft => "Soft",
    }
}

wire_enum! {
    pub enum ResetStatus {
        Accepted => "Accepted",
        Rejected => "Rejected",
    }
}

wire_enum! {
    /// Local authorization list update type
    pub enum UpdateType {
        Differential => "Differential",
        Full => "Full",
    }
}

wire_enum! {
    pub enum UpdateStatus {
        Accepted => "Accepted",
        Failed => "Failed",
        NotSupported => "NotSupported",
        VersionMismatch => "VersionMismatch",
    }
}

wire_enum! {
    pub enum ChargingProfileStatus {
        Accepted => "Accepted",
        Rejected => "Rejected",
        NotSupported => "NotSupported",
    }
}

wire_enum! {
    /// Messages the central system may ask the charge point to send
    pub enum MessageTrigger {
        BootNotification => "BootNotification",
        DiagnosticsStatusNotification => "DiagnosticsStatusNotification",
        FirmwareStatusNotification => "FirmwareStatusNotification",
        Heartbeat => "Heartbeat",
        MeterValues => "MeterValues",
        StatusNotification => "StatusNotification",
    }
}

wire_enum! {
    pub enum TriggerMessageStatus {
        Accepted => "Accepted",
        Rejected => "Rejected",
        NotImplemented => "NotImplemented",
    }
}

wire_enum! {
    pub enum UnlockStatus {
        Unlocked => "Unlocked",
        UnlockFailed => "UnlockFailed",
        NotSupported => "NotSupported",
    }
}

// ============================================================================
// Composite Types
// ============================================================================

/// Authorization result for an id tag
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdTagInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiry_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id_tag: Option<IdToken>,
    pub status: AuthorizationStatus,
}

impl IdTagInfo {
    pub fn new(status: AuthorizationStatus) -> Self {
        Self {
            expiry_date: None,
            parent_id_tag: None,
            status,
        }
    }
}

impl XmlCodec for IdTagInfo {
    fn write_xml(&self, element: XmlElement) -> XmlElement {
        element
            .with_opt_datetime("expiryDate", self.expiry_date.as_ref())
            .with_opt_text("parentIdTag", self.parent_id_tag.as_ref())
            .with_text("status", self.status)
    }

    fn read_xml(element: &XmlElement) -> Result<Self, ParseError> {
        Ok(Self {
            expiry_date: element.opt_datetime("expiryDate")?,
            parent_id_tag: element.opt_parse_child("parentIdTag")?,
            status: element.parse_child("status")?,
        })
    }
}

/// Entry of a local authorization list
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorizationData {
    pub id_tag: IdToken,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id_tag_info: Option<IdTagInfo>,
}

impl XmlCodec for AuthorizationData {
    fn write_xml(&self, element: XmlElement) -> XmlElement {
        element
            .with_text("idTag", &self.id_tag)
            .with_opt_nested("idTagInfo", self.id_tag_info.as_ref())
    }

    fn read_xml(element: &XmlElement) -> Result<Self, ParseError> {
        Ok(Self {
            id_tag: element.parse_child("idTag")?,
            id_tag_info: element.opt_nested("idTagInfo")?,
        })
    }
}

/// Single sampled value; the value itself is a string in OCPP 1.6
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SampledValue {
    pub value: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<ReadingContext>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<ValueFormat>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub measurand: Option<Measurand>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phase: Option<Phase>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<UnitOfMeasure>,
}

impl SampledValue {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            context: None,
            format: None,
            measurand: None,
            phase: None,
            location: None,
            unit: None,
        }
    }
}

impl XmlCodec for SampledValue {
    fn write_xml(&self, element: XmlElement) -> XmlElement {
        element
            .with_text("value", &self.value)
            .with_opt_text("context", self.context.as_ref())
            .with_opt_text("format", self.format.as_ref())
            .with_opt_text("measurand", self.measurand.as_ref())
            .with_opt_text("phase", self.phase.as_ref())
            .with_opt_text("location", self.location.as_ref())
            .with_opt_text("unit", self.unit.as_ref())
    }

    fn read_xml(element: &XmlElement) -> Result<Self, ParseError> {
        Ok(Self {
            value: element.parse_child("value")?,
            context: element.opt_parse_child("context")?,
            format: element.opt_parse_child("format")?,
            measurand: element.opt_parse_child("measurand")?,
            phase: element.opt_parse_child("phase")?,
            location: element.opt_parse_child("location")?,
            unit: element.opt_parse_child("unit")?,
        })
    }
}

/// Meter value with timestamp and samples
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeterValue {
    pub timestamp: DateTime<Utc>,
    pub sampled_value: Vec<SampledValue>,
}

impl MeterValue {
    pub fn new(timestamp: DateTime<Utc>, sampled_value: Vec<SampledValue>) -> Result<Self, ValidationError> {
        let value = Self {
            timestamp,
            sampled_value,
        };
        value.validate()?;
        Ok(value)
    }
}

impl Validate for MeterValue {
    fn validate(&self) -> Result<(), ValidationError> {
        if self.sampled_value.is_empty() {
            return Err(ValidationError::new("sampledValue", "at least one sampled value is required"));
        }
        Ok(())
    }
}

impl XmlCodec for MeterValue {
    fn write_xml(&self, element: XmlElement) -> XmlElement {
        element
            .with_datetime("timestamp", &self.timestamp)
            .with_list("sampledValue", &self.sampled_value)
    }

    fn read_xml(element: &XmlElement) -> Result<Self, ParseError> {
        Ok(Self {
            timestamp: element.datetime("timestamp")?,
            sampled_value: element.list("sampledValue")?,
        })
    }
}

/// Validate every meter value, reporting the index of the first bad one
pub(crate) fn validate_meter_values(field: &str, values: &[MeterValue]) -> Result<(), ValidationError> {
    for (index, value) in values.iter().enumerate() {
        value
            .validate()
            .map_err(|e| e.within(&format!("{}[{}]", field, index)))?;
    }
    Ok(())
}

/// Connector ids that address a physical connector must be > 0
pub(crate) fn physical_connector(field: &str, connector_id: u32) -> Result<(), ValidationError> {
    if connector_id == 0 {
        return Err(ValidationError::new(field, "must be greater than 0"));
    }
    Ok(())
}

/// Charging schedule period
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChargingSchedulePeriod {
    /// Seconds from the start of the schedule
    pub start_period: u32,
    pub limit: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number_phases: Option<u32>,
}

impl ChargingSchedulePeriod {
    pub fn new(start_period: u32, limit: Decimal) -> Result<Self, ValidationError> {
        let period = Self {
            start_period,
            limit,
            number_phases: None,
        };
        period.validate()?;
        Ok(period)
    }
}

impl Validate for ChargingSchedulePeriod {
    fn validate(&self) -> Result<(), ValidationError> {
        if self.limit.is_negative() {
            return Err(ValidationError::new("limit", "must not be negative"));
        }
        if let Some(phases) = self.number_phases {
            if !(1..=3).contains(&phases) {
                return Err(ValidationError::new("numberPhases", format!("{} is not in 1..=3", phases)));
            }
        }
        Ok(())
    }
}

impl XmlCodec for ChargingSchedulePeriod {
    fn write_xml(&self, element: XmlElement) -> XmlElement {
        element
            .with_text("startPeriod", self.start_period)
            .with_text("limit", self.limit)
            .with_opt_text("numberPhases", self.number_phases.as_ref())
    }

    fn read_xml(element: &XmlElement) -> Result<Self, ParseError> {
        Ok(Self {
            start_period: element.parse_child("startPeriod")?,
            limit: element.parse_child("limit")?,
            number_phases: element.opt_parse_child("numberPhases")?,
        })
    }
}

/// Charging schedule
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChargingSchedule {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_schedule: Option<DateTime<Utc>>,
    pub charging_rate_unit: ChargingRateUnit,
    pub charging_schedule_period: Vec<ChargingSchedulePeriod>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_charging_rate: Option<Decimal>,
}

impl ChargingSchedule {
    pub fn new(
        charging_rate_unit: ChargingRateUnit,
        periods: Vec<ChargingSchedulePeriod>,
    ) -> Result<Self, ValidationError> {
        let schedule = Self {
            duration: None,
            start_schedule: None,
            charging_rate_unit,
            charging_schedule_period: periods,
            min_charging_rate: None,
        };
        schedule.validate()?;
        Ok(schedule)
    }
}

impl Validate for ChargingSchedule {
    fn validate(&self) -> Result<(), ValidationError> {
        if self.charging_schedule_period.is_empty() {
            return Err(ValidationError::new("chargingSchedulePeriod", "at least one period is required"));
        }
        let mut previous: Option<u32> = None;
        for (index, period) in self.charging_schedule_period.iter().enumerate() {
            let field = format!("chargingSchedulePeriod[{}]", index);
            period.validate().map_err(|e| e.within(&field))?;
            if previous.is_some_and(|start| period.start_period <= start) {
                return Err(ValidationError::new(field, "startPeriod must be strictly increasing"));
            }
            previous = Some(period.start_period);
        }
        if self.min_charging_rate.is_some_and(Decimal::is_negative) {
            return Err(ValidationError::new("minChargingRate", "must not be negative"));
        }
        Ok(())
    }
}

impl XmlCodec for ChargingSchedule {
    fn write_xml(&self, element: XmlElement) -> XmlElement {
        element
            .with_opt_text("duration", self.duration.as_ref())
            .with_opt_datetime("startSchedule", self.start_schedule.as_ref())
            .with_text("chargingRateUnit", self.charging_rate_unit)
            .with_list("chargingSchedulePeriod", &self.charging_schedule_period)
            .with_opt_text("minChargingRate", self.min_charging_rate.as_ref())
    }

    fn read_xml(element: &XmlElement) -> Result<Self, ParseError> {
        Ok(Self {
            duration: element.opt_parse_child("duration")?,
            start_schedule: element.opt_datetime("startSchedule")?,
            charging_rate_unit: element.parse_child("chargingRateUnit")?,
            charging_schedule_period: element.list("chargingSchedulePeriod")?,
            min_charging_rate: element.opt_parse_child("minChargingRate")?,
        })
    }
}

/// Charging profile
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChargingProfile {
    pub charging_profile_id: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transaction_id: Option<i32>,
    pub stack_level: u32,
    pub charging_profile_purpose: ChargingProfilePurpose,
    pub charging_profile_kind: ChargingProfileKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recurrency_kind: Option<RecurrencyKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub valid_from: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub valid_to: Option<DateTime<Utc>>,
    pub charging_schedule: ChargingSchedule,
}

impl ChargingProfile {
    /// Non-recurring profile; `Recurring` needs [`ChargingProfile::recurring`]
    pub fn new(
        charging_profile_id: i32,
        stack_level: u32,
        purpose: ChargingProfilePurpose,
        kind: ChargingProfileKind,
        schedule: ChargingSchedule,
    ) -> Result<Self, ValidationError> {
        let profile = Self {
            charging_profile_id,
            transaction_id: None,
            stack_level,
            charging_profile_purpose: purpose,
            charging_profile_kind: kind,
            recurrency_kind: None,
            valid_from: None,
            valid_to: None,
            charging_schedule: schedule,
        };
        profile.validate()?;
        Ok(profile)
    }

    pub fn recurring(
        charging_profile_id: i32,
        stack_level: u32,
        purpose: ChargingProfilePurpose,
        recurrency: RecurrencyKind,
        schedule: ChargingSchedule,
    ) -> Result<Self, ValidationError> {
        let profile = Self {
            charging_profile_id,
            transaction_id: None,
            stack_level,
            charging_profile_purpose: purpose,
            charging_profile_kind: ChargingProfileKind::Recurring,
            recurrency_kind: Some(recurrency),
            valid_from: None,
            valid_to: None,
            charging_schedule: schedule,
        };
        profile.validate()?;
        Ok(profile)
    }
}

impl Validate for ChargingProfile {
    fn validate(&self) -> Result<(), ValidationError> {
        if self.charging_profile_kind == ChargingProfileKind::Recurring && self.recurrency_kind.is_none() {
            return Err(ValidationError::new("recurrencyKind", "required for Recurring profiles"));
        }
        if self.transaction_id.is_some() && self.charging_profile_purpose != ChargingProfilePurpose::TxProfile {
            return Err(ValidationError::new("transactionId", "only allowed on TxProfile"));
        }
        if let (Some(from), Some(to)) = (self.valid_from, self.valid_to) {
            if from > to {
                return Err(ValidationError::new("validTo", "lies before validFrom"));
            }
        }
        self.charging_schedule
            .validate()
            .map_err(|e| e.within("chargingSchedule"))
    }
}

impl XmlCodec for ChargingProfile {
    fn write_xml(&self, element: XmlElement) -> XmlElement {
        element
            .with_text("chargingProfileId", self.charging_profile_id)
            .with_opt_text("transactionId", self.transaction_id.as_ref())
            .with_text("stackLevel", self.stack_level)
            .with_text("chargingProfilePurpose", self.charging_profile_purpose)
            .with_text("chargingProfileKind", self.charging_profile_kind)
            .with_opt_text("recurrencyKind", self.recurrency_kind.as_ref())
            .with_opt_datetime("validFrom", self.valid_from.as_ref())
            .with_opt_datetime("validTo", self.valid_to.as_ref())
            .with_nested("chargingSchedule", &self.charging_schedule)
    }

    fn read_xml(element: &XmlElement) -> Result<Self, ParseError> {
        Ok(Self {
            charging_profile_id: element.parse_child("chargingProfileId")?,
            transaction_id: element.opt_parse_child("transactionId")?,
            stack_level: element.parse_child("stackLevel")?,
            charging_profile_purpose: element.parse_child("chargingProfilePurpose")?,
            charging_profile_kind: element.parse_child("chargingProfileKind")?,
            recurrency_kind: element.opt_parse_child("recurrencyKind")?,
            valid_from: element.opt_datetime("validFrom")?,
            valid_to: element.opt_datetime("validTo")?,
            charging_schedule: element.nested("chargingSchedule")?,
        })
    }
}

/// Configuration key with its value
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyValue {
    pub key: CiString50,
    pub readonly: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<CiString500>,
}

impl XmlCodec for KeyValue {
    fn write_xml(&self, element: XmlElement) -> XmlElement {
        element
            .with_text("key", &self.key)
            .with_text("readonly", self.readonly)
            .with_opt_text("value", self.value.as_ref())
    }

    fn read_xml(element: &XmlElement) -> Result<Self, ParseError> {
        Ok(Self {
            key: element.parse_child("key")?,
            readonly: element.bool_child("readonly")?,
            value: element.opt_parse_child("value")?,
        })
    }
}

unconstrained!(IdTagInfo, AuthorizationData, SampledValue, KeyValue);

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn period(start: u32, limit: f64) -> ChargingSchedulePeriod {
        ChargingSchedulePeriod {
            start_period: start,
            limit: Decimal::new(limit).unwrap(),
            number_phases: None,
        }
    }

    fn schedule(periods: &[(u32, f64)]) -> ChargingSchedule {
        ChargingSchedule {
            duration: None,
            start_schedule: None,
            charging_rate_unit: ChargingRateUnit::A,
            charging_schedule_period: periods.iter().map(|&(start, limit)| period(start, limit)).collect(),
            min_charging_rate: None,
        }
    }

    #[test]
    fn test_enum_wire_strings() {
        assert_eq!(Measurand::EnergyActiveImportRegister.to_string(), "Energy.Active.Import.Register");
        assert_eq!("L1-N".parse::<Phase>().unwrap(), Phase::L1N);
        assert_eq!(
            serde_json::to_value(ChargePointStatus::SuspendedEvse).unwrap(),
            json!("SuspendedEVSE")
        );
        assert!("Charging".parse::<ResetType>().is_err());
        assert!(serde_json::from_value::<UnitOfMeasure>(json!("kwh")).is_err());
    }

    #[test]
    fn test_celsius_schema_spelling() {
        assert_eq!(serde_json::from_value::<UnitOfMeasure>(json!("Celcius")).unwrap(), UnitOfMeasure::Celsius);
        assert_eq!("Celcius".parse::<UnitOfMeasure>().unwrap(), UnitOfMeasure::Celsius);
        assert_eq!(UnitOfMeasure::Celsius.as_str(), "Celsius");
        assert_eq!(serde_json::to_value(UnitOfMeasure::Celsius).unwrap(), json!("Celsius"));

        let sample = XmlElement::parse("<sampledValue><value>21.5</value><unit>Celcius</unit></sampledValue>").unwrap();
        assert_eq!(SampledValue::read_xml(&sample).unwrap().unit, Some(UnitOfMeasure::Celsius));
    }

    #[test]
    fn test_schedule_period_order() {
        assert!(schedule(&[(0, 16.0), (3600, 8.0)]).validate().is_ok());

        let err = schedule(&[(0, 16.0), (0, 8.0)]).validate().unwrap_err();
        assert_eq!(err.field, "chargingSchedulePeriod[1]");

        assert!(schedule(&[]).validate().is_err());
        assert!(schedule(&[(0, -1.0)]).validate().is_err());
    }

    #[test]
    fn test_profile_rules() {
        let err = ChargingProfile::new(
            1,
            0,
            ChargingProfilePurpose::TxDefaultProfile,
            ChargingProfileKind::Recurring,
            schedule(&[(0, 32.0)]),
        )
        .unwrap_err();
        assert_eq!(err.field, "recurrencyKind");

        let mut profile = ChargingProfile::recurring(
            1,
            0,
            ChargingProfilePurpose::TxDefaultProfile,
            RecurrencyKind::Daily,
            schedule(&[(0, 32.0)]),
        )
        .unwrap();
        assert_eq!(profile.charging_profile_kind, ChargingProfileKind::Recurring);

        profile.transaction_id = Some(7);
        assert_eq!(profile.validate().unwrap_err().field, "transactionId");
    }

    #[test]
    fn test_profile_xml_roundtrip() {
        let mut profile = ChargingProfile::new(
            12,
            2,
            ChargingProfilePurpose::TxProfile,
            ChargingProfileKind::Absolute,
            schedule(&[(0, 16.5), (900, 10.0)]),
        )
        .unwrap();
        profile.transaction_id = Some(4711);

        let element = profile.write_xml(XmlElement::new("csChargingProfiles"));
        let parsed = XmlElement::parse(&element.to_string()).unwrap();
        assert_eq!(ChargingProfile::read_xml(&parsed).unwrap(), profile);
    }

    #[test]
    fn test_constructors_reject_rule_breaking_values() {
        let err = ChargingSchedulePeriod::new(0, Decimal::new(-6.0).unwrap()).unwrap_err();
        assert_eq!(err.field, "limit");
        assert!(ChargingSchedulePeriod::new(60, Decimal::from(16)).is_ok());

        let err = ChargingSchedule::new(ChargingRateUnit::W, vec![]).unwrap_err();
        assert_eq!(err.field, "chargingSchedulePeriod");

        let err = ChargingSchedule::new(ChargingRateUnit::W, vec![period(600, 11000.0), period(0, 7400.0)])
            .unwrap_err();
        assert_eq!(err.field, "chargingSchedulePeriod[1]");

        let err = ChargingProfile::new(
            3,
            0,
            ChargingProfilePurpose::ChargePointMaxProfile,
            ChargingProfileKind::Absolute,
            schedule(&[]),
        )
        .unwrap_err();
        assert_eq!(err.field, "chargingSchedule.chargingSchedulePeriod");

        let err = MeterValue::new(Utc::now(), vec![]).unwrap_err();
        assert_eq!(err.field, "sampledValue");
        assert!(MeterValue::new(Utc::now(), vec![SampledValue::new("12.5")]).is_ok());
    }

    #[test]
    fn test_nested_missing_field_path() {
        let element = XmlElement::new("x").with_child(XmlElement::new("idTagInfo"));
        let err = element.nested::<IdTagInfo>("idTagInfo").unwrap_err();
        assert_eq!(err, ParseError::MissingField("idTagInfo.status".to_string()));
    }
}
