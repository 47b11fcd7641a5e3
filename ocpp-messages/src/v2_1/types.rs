//! OCPP 2.1 enumerations and composite types
//!
//! Every composite type carries an optional `customData` object. Its
//! `vendorId` is typed; any further vendor properties are kept verbatim so
//! they survive a parse/serialize cycle.

use std::collections::{BTreeMap, HashSet};
use std::fmt;
use std::hash::{Hash, Hasher};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::common::{
    CiString1024, CiString20, CiString255, CiString36, CiString50, CiString8, Decimal, Validate,
};
use crate::error::ValidationError;

// ============================================================================
// Extension points
// ============================================================================

/// Vendor extension object allowed on every 2.1 type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomData {
    #[serde(rename = "vendorId")]
    pub vendor_id: CiString255,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl CustomData {
    pub fn new(vendor_id: CiString255) -> Self {
        Self {
            vendor_id,
            extra: BTreeMap::new(),
        }
    }

    pub fn with_property(mut self, name: impl Into<String>, value: Value) -> Self {
        self.extra.insert(name.into(), value);
        self
    }
}

impl Hash for CustomData {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.vendor_id.hash(state);
        // BTreeMap keeps the rendering canonical
        for (name, value) in &self.extra {
            name.hash(state);
            value.to_string().hash(state);
        }
    }
}

/// Arbitrary JSON value (e.g. `DataTransfer.data`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnyValue(pub Value);

impl Hash for AnyValue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.to_string().hash(state);
    }
}

impl From<Value> for AnyValue {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

impl fmt::Display for AnyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// Enumerations
// ============================================================================

wire_enum! {
    pub enum AuthorizationStatus {
        Accepted => "Accepted",
        Blocked => "Blocked",
        ConcurrentTx => "ConcurrentTx",
        Expired => "Expired",
        Invalid => "Invalid",
        NoCredit => "NoCredit",
        NotAllowedTypeEvse => "NotAllowedTypeEVSE",
        NotAtThisLocation => "NotAtThisLocation",
        NotAtThisTime => "NotAtThisTime",
        Unknown => "Unknown",
    }
}

wire_enum! {
    /// Kind of identifier carried by an `IdToken`
    pub enum IdTokenKind {
        Central => "Central",
        DirectPayment => "DirectPayment",
        EMaid => "eMAID",
        EvccId => "EVCCID",
        Iso14443 => "ISO14443",
        Iso15693 => "ISO15693",
        KeyCode => "KeyCode",
        Local => "Local",
        MacAddress => "MacAddress",
        NoAuthorization => "NoAuthorization",
        Vin => "VIN",
    }
}

wire_enum! {
    pub enum BootReason {
        ApplicationReset => "ApplicationReset",
        FirmwareUpdate => "FirmwareUpdate",
        LocalReset => "LocalReset",
        PowerUp => "PowerUp",
        RemoteReset => "RemoteReset",
        ScheduledReset => "ScheduledReset",
        Triggered => "Triggered",
        Unknown => "Unknown",
        Watchdog => "Watchdog",
    }
}

wire_enum! {
    pub enum RegistrationStatus {
        Accepted => "Accepted",
        Pending => "Pending",
        Rejected => "Rejected",
    }
}

wire_enum! {
    pub enum ResetType {
        Immediate => "Immediate",
        OnIdle => "OnIdle",
        ImmediateAndResume => "ImmediateAndResume",
    }
}

wire_enum! {
    pub enum ResetStatus {
        Accepted => "Accepted",
        Rejected => "Rejected",
        Scheduled => "Scheduled",
    }
}

wire_enum! {
    /// Which value of a variable is addressed
    pub enum Attribute {
        Actual => "Actual",
        Target => "Target",
        MinSet => "MinSet",
        MaxSet => "MaxSet",
    }
}

wire_enum! {
    pub enum GetVariableStatus {
        Accepted => "Accepted",
        Rejected => "Rejected",
        UnknownComponent => "UnknownComponent",
        UnknownVariable => "UnknownVariable",
        NotSupportedAttributeType => "NotSupportedAttributeType",
    }
}

wire_enum! {
    pub enum SetVariableStatus {
        Accepted => "Accepted",
        Rejected => "Rejected",
        UnknownComponent => "UnknownComponent",
        UnknownVariable => "UnknownVariable",
        NotSupportedAttributeType => "NotSupportedAttributeType",
        RebootRequired => "RebootRequired",
    }
}

wire_enum! {
    pub enum ClearCacheStatus {
        Accepted => "Accepted",
        Rejected => "Rejected",
    }
}

wire_enum! {
    pub enum UpdateType {
        Differential => "Differential",
        Full => "Full",
    }
}

wire_enum! {
    pub enum SendLocalListStatus {
        Accepted => "Accepted",
        Failed => "Failed",
        VersionMismatch => "VersionMismatch",
    }
}

wire_enum! {
    pub enum OperationalStatus {
        Inoperative => "Inoperative",
        Operative => "Operative",
    }
}

wire_enum! {
    pub enum ChangeAvailabilityStatus {
        Accepted => "Accepted",
        Rejected => "Rejected",
        Scheduled => "Scheduled",
    }
}

wire_enum! {
    /// Connector status
    pub enum ConnectorStatus {
        Available => "Available",
        Occupied => "Occupied",
        Reserved => "Reserved",
        Unavailable => "Unavailable",
        Faulted => "Faulted",
    }
}

wire_enum! {
    pub enum RequestStartStopStatus {
        Accepted => "Accepted",
        Rejected => "Rejected",
    }
}

wire_enum! {
    pub enum UnlockStatus {
        Unlocked => "Unlocked",
        UnlockFailed => "UnlockFailed",
        OngoingAuthorizedTransaction => "OngoingAuthorizedTransaction",
        UnknownConnector => "UnknownConnector",
    }
}

wire_enum! {
    pub enum MessageTrigger {
        BootNotification => "BootNotification",
        LogStatusNotification => "LogStatusNotification",
        FirmwareStatusNotification => "FirmwareStatusNotification",
        Heartbeat => "Heartbeat",
        MeterValues => "MeterValues",
        SignChargingStationCertificate => "SignChargingStationCertificate",
        SignV2GCertificate => "SignV2GCertificate",
        SignV2G20Certificate => "SignV2G20Certificate",
        StatusNotification => "StatusNotification",
        TransactionEvent => "TransactionEvent",
        SignCombinedCertificate => "SignCombinedCertificate",
        PublishFirmwareStatusNotification => "PublishFirmwareStatusNotification",
        CustomTrigger => "CustomTrigger",
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
    pub enum ReserveNowStatus {
        Accepted => "Accepted",
        Faulted => "Faulted",
        Occupied => "Occupied",
        Rejected => "Rejected",
        Unavailable => "Unavailable",
    }
}

wire_enum! {
    pub enum CancelReservationStatus {
        Accepted => "Accepted",
        Rejected => "Rejected",
    }
}

wire_enum! {
    /// Charging profile purpose
    pub enum ChargingProfilePurpose {
        ChargingStationExternalConstraints => "ChargingStationExternalConstraints",
        ChargingStationMaxProfile => "ChargingStationMaxProfile",
        TxDefaultProfile => "TxDefaultProfile",
        TxProfile => "TxProfile",
        PriorityCharging => "PriorityCharging",
        LocalGeneration => "LocalGeneration",
    }
}

wire_enum! {
    pub enum ChargingProfileKind {
        Absolute => "Absolute",
        Recurring => "Recurring",
        Relative => "Relative",
        Dynamic => "Dynamic",
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
    pub enum ChargingProfileStatus {
        Accepted => "Accepted",
        Rejected => "Rejected",
    }
}

wire_enum! {
    pub enum ClearChargingProfileStatus {
        Accepted => "Accepted",
        Unknown => "Unknown",
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
    pub enum MessageFormat {
        Ascii => "ASCII",
        Html => "HTML",
        Uri => "URI",
        Utf8 => "UTF8",
        QrCode => "QRCODE",
    }
}

wire_enum! {
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
    pub enum Measurand {
        CurrentExport => "Current.Export",
        CurrentExportOffered => "Current.Export.Offered",
        CurrentExportMinimum => "Current.Export.Minimum",
        CurrentImport => "Current.Import",
        CurrentImportOffered => "Current.Import.Offered",
        CurrentImportMinimum => "Current.Import.Minimum",
        CurrentOffered => "Current.Offered",
        DisplayPresentSoC => "Display.PresentSOC",
        DisplayMinimumSoC => "Display.MinimumSOC",
        DisplayTargetSoC => "Display.TargetSOC",
        DisplayMaximumSoC => "Display.MaximumSOC",
        DisplayRemainingTimeToMinimumSoC => "Display.RemainingTimeToMinimumSOC",
        DisplayRemainingTimeToTargetSoC => "Display.RemainingTimeToTargetSOC",
        DisplayRemainingTimeToMaximumSoC => "Display.RemainingTimeToMaximumSOC",
        DisplayChargingComplete => "Display.ChargingComplete",
        DisplayBatteryEnergyCapacity => "Display.BatteryEnergyCapacity",
        DisplayInletHot => "Display.InletHot",
        EnergyActiveExportInterval => "Energy.Active.Export.Interval",
        EnergyActiveExportRegister => "Energy.Active.Export.Register",
        EnergyActiveImportInterval => "Energy.Active.Import.Interval",
        EnergyActiveImportRegister => "Energy.Active.Import.Register",
        EnergyActiveImportCableLoss => "Energy.Active.Import.CableLoss",
        EnergyActiveImportLocalGenerationRegister => "Energy.Active.Import.LocalGeneration.Register",
        EnergyActiveNet => "Energy.Active.Net",
        EnergyActiveSetpointInterval => "Energy.Active.Setpoint.Interval",
        EnergyApparentExport => "Energy.Apparent.Export",
        EnergyApparentImport => "Energy.Apparent.Import",
        EnergyApparentNet => "Energy.Apparent.Net",
        EnergyReactiveExportInterval => "Energy.Reactive.Export.Interval",
        EnergyReactiveExportRegister => "Energy.Reactive.Export.Register",
        EnergyReactiveImportInterval => "Energy.Reactive.Import.Interval",
        EnergyReactiveImportRegister => "Energy.Reactive.Import.Register",
        EnergyReactiveNet => "Energy.Reactive.Net",
        EnergyRequestTarget => "EnergyRequest.Target",
        EnergyRequestMinimum => "EnergyRequest.Minimum",
        EnergyRequestMaximum => "EnergyRequest.Maximum",
        EnergyRequestMinimumV2x => "EnergyRequest.Minimum.V2X",
        EnergyRequestMaximumV2x => "EnergyRequest.Maximum.V2X",
        EnergyRequestBulk => "EnergyRequest.Bulk",
        Frequency => "Frequency",
        PowerActiveExport => "Power.Active.Export",
        PowerActiveImport => "Power.Active.Import",
        PowerActiveSetpoint => "Power.Active.Setpoint",
        PowerActiveResidual => "Power.Active.Residual",
        PowerExportMinimum => "Power.Export.Minimum",
        PowerExportOffered => "Power.Export.Offered",
        PowerFactor => "Power.Factor",
        PowerImportOffered => "Power.Import.Offered",
        PowerImportMinimum => "Power.Import.Minimum",
        PowerOffered => "Power.Offered",
        PowerReactiveExport => "Power.Reactive.Export",
        PowerReactiveImport => "Power.Reactive.Import",
        SoC => "SoC",
        Voltage => "Voltage",
        VoltageMinimum => "Voltage.Minimum",
        VoltageMaximum => "Voltage.Maximum",
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
        Upstream => "Upstream",
    }
}

// ============================================================================
// Composite Types
// ============================================================================

/// Detail about a status returned in a response
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusInfo {
    pub reason_code: CiString20,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub additional_info: Option<CiString1024>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_data: Option<CustomData>,
}

impl StatusInfo {
    pub fn new(reason_code: CiString20) -> Self {
        Self {
            reason_code,
            additional_info: None,
            custom_data: None,
        }
    }
}

/// Additional identifier attached to an `IdToken`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdditionalInfo {
    pub additional_id_token: CiString255,
    #[serde(rename = "type")]
    pub info_type: CiString50,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_data: Option<CustomData>,
}

/// Identification token
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdToken {
    pub id_token: CiString255,
    #[serde(rename = "type")]
    pub token_type: IdTokenKind,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub additional_info: Vec<AdditionalInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_data: Option<CustomData>,
}

impl IdToken {
    pub fn new(id_token: CiString255, token_type: IdTokenKind) -> Self {
        Self {
            id_token,
            token_type,
            additional_info: Vec::new(),
            custom_data: None,
        }
    }
}

impl fmt::Display for IdToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.token_type, self.id_token)
    }
}

/// Message to show to the driver
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageContent {
    pub format: MessageFormat,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<CiString8>,
    pub content: CiString1024,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_data: Option<CustomData>,
}

/// Authorization result for an `IdToken`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdTokenInfo {
    pub status: AuthorizationStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cache_expiry_date_time: Option<DateTime<Utc>>,
    /// -9 (lowest) ..= 9 (highest)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub charging_priority: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language1: Option<CiString8>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub evse_id: Vec<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_id_token: Option<IdToken>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language2: Option<CiString8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub personal_message: Option<MessageContent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_data: Option<CustomData>,
}

impl IdTokenInfo {
    pub fn new(status: AuthorizationStatus) -> Self {
        Self {
            status,
            cache_expiry_date_time: None,
            charging_priority: None,
            language1: None,
            evse_id: Vec::new(),
            group_id_token: None,
            language2: None,
            personal_message: None,
            custom_data: None,
        }
    }
}

impl Validate for IdTokenInfo {
    fn validate(&self) -> Result<(), ValidationError> {
        if let Some(priority) = self.charging_priority {
            if !(-9..=9).contains(&priority) {
                return Err(ValidationError::new("chargingPriority", format!("{} is not in -9..=9", priority)));
            }
        }
        Ok(())
    }
}

/// EVSE, optionally narrowed to one connector
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Evse {
    pub id: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub connector_id: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_data: Option<CustomData>,
}

impl Evse {
    pub fn new(id: u32) -> Self {
        Self {
            id,
            connector_id: None,
            custom_data: None,
        }
    }
}

/// Device model component
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Component {
    pub name: CiString50,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instance: Option<CiString50>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub evse: Option<Evse>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_data: Option<CustomData>,
}

impl Component {
    pub fn new(name: CiString50) -> Self {
        Self {
            name,
            instance: None,
            evse: None,
            custom_data: None,
        }
    }
}

/// Device model variable
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Variable {
    pub name: CiString50,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instance: Option<CiString50>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_data: Option<CustomData>,
}

impl Variable {
    pub fn new(name: CiString50) -> Self {
        Self {
            name,
            instance: None,
            custom_data: None,
        }
    }
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)?;
        if let Some(instance) = &self.instance {
            write!(f, "[{}]", instance)?;
        }
        Ok(())
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)?;
        if let Some(instance) = &self.instance {
            write!(f, "[{}]", instance)?;
        }
        Ok(())
    }
}

/// Charging station identification sent at boot
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChargingStation {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub serial_number: Option<crate::common::CiString25>,
    pub model: CiString20,
    pub vendor_name: CiString50,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub firmware_version: Option<CiString50>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_data: Option<CustomData>,
}

impl ChargingStation {
    pub fn new(vendor_name: CiString50, model: CiString20) -> Self {
        Self {
            serial_number: None,
            model,
            vendor_name,
            firmware_version: None,
            custom_data: None,
        }
    }
}

/// Entry of a local authorization list
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorizationData {
    pub id_token: IdToken,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id_token_info: Option<IdTokenInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_data: Option<CustomData>,
}

impl Validate for AuthorizationData {
    fn validate(&self) -> Result<(), ValidationError> {
        match &self.id_token_info {
            Some(info) => info.validate().map_err(|e| e.within("idTokenInfo")),
            None => Ok(()),
        }
    }
}

// ----------------------------------------------------------------------------
// Metering
// ----------------------------------------------------------------------------

/// Unit and power-of-ten multiplier of a sampled value
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnitOfMeasure {
    /// Defaults to `Wh` when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<CiString20>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub multiplier: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_data: Option<CustomData>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SampledValue {
    pub value: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub measurand: Option<Measurand>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<ReadingContext>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phase: Option<Phase>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit_of_measure: Option<UnitOfMeasure>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_data: Option<CustomData>,
}

impl SampledValue {
    pub fn new(value: Decimal) -> Self {
        Self {
            value,
            measurand: None,
            context: None,
            phase: None,
            location: None,
            unit_of_measure: None,
            custom_data: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeterValue {
    pub sampled_value: Vec<SampledValue>,
    pub timestamp: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_data: Option<CustomData>,
}

impl MeterValue {
    /// Rejects an empty `sampled_value`
    pub fn new(timestamp: DateTime<Utc>, sampled_value: Vec<SampledValue>) -> Result<Self, ValidationError> {
        let value = Self {
            sampled_value,
            timestamp,
            custom_data: None,
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

// ----------------------------------------------------------------------------
// Smart charging
// ----------------------------------------------------------------------------

wire_enum! {
    /// How the EVSE operates during a schedule period
    pub enum OperationMode {
        Idle => "Idle",
        ChargingOnly => "ChargingOnly",
        CentralSetpoint => "CentralSetpoint",
        ExternalSetpoint => "ExternalSetpoint",
        ExternalLimits => "ExternalLimits",
        CentralFrequency => "CentralFrequency",
        LocalFrequency => "LocalFrequency",
        LocalLoadBalancing => "LocalLoadBalancing",
    }
}

/// Point on a V2X frequency/power curve
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct V2xFreqWattPoint {
    pub frequency: Decimal,
    pub power: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_data: Option<CustomData>,
}

/// Point on a V2X signal/power curve
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct V2xSignalWattPoint {
    pub signal: i32,
    pub power: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_data: Option<CustomData>,
}

/// One period of a charging schedule.
///
/// Every quantity except `startPeriod` is optional: a period may carry a
/// charge limit, a discharge limit, a setpoint, or only an operation mode.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChargingSchedulePeriod {
    pub start_period: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<Decimal>,
    #[serde(rename = "limit_L2", skip_serializing_if = "Option::is_none")]
    pub limit_l2: Option<Decimal>,
    #[serde(rename = "limit_L3", skip_serializing_if = "Option::is_none")]
    pub limit_l3: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number_phases: Option<u32>,
    /// Phase to charge on when `numberPhases` is 1
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phase_to_use: Option<u32>,
    /// Discharge limits are zero or negative
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discharge_limit: Option<Decimal>,
    #[serde(rename = "dischargeLimit_L2", skip_serializing_if = "Option::is_none")]
    pub discharge_limit_l2: Option<Decimal>,
    #[serde(rename = "dischargeLimit_L3", skip_serializing_if = "Option::is_none")]
    pub discharge_limit_l3: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub setpoint: Option<Decimal>,
    #[serde(rename = "setpoint_L2", skip_serializing_if = "Option::is_none")]
    pub setpoint_l2: Option<Decimal>,
    #[serde(rename = "setpoint_L3", skip_serializing_if = "Option::is_none")]
    pub setpoint_l3: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub setpoint_reactive: Option<Decimal>,
    #[serde(rename = "setpointReactive_L2", skip_serializing_if = "Option::is_none")]
    pub setpoint_reactive_l2: Option<Decimal>,
    #[serde(rename = "setpointReactive_L3", skip_serializing_if = "Option::is_none")]
    pub setpoint_reactive_l3: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preconditioning_request: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub evse_sleep: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub v2x_baseline: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operation_mode: Option<OperationMode>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub v2x_freq_watt_curve: Vec<V2xFreqWattPoint>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub v2x_signal_watt_curve: Vec<V2xSignalWattPoint>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_data: Option<CustomData>,
}

impl ChargingSchedulePeriod {
    /// Period starting at `start_period` with no quantities set
    pub fn starting_at(start_period: u32) -> Self {
        Self {
            start_period,
            limit: None,
            limit_l2: None,
            limit_l3: None,
            number_phases: None,
            phase_to_use: None,
            discharge_limit: None,
            discharge_limit_l2: None,
            discharge_limit_l3: None,
            setpoint: None,
            setpoint_l2: None,
            setpoint_l3: None,
            setpoint_reactive: None,
            setpoint_reactive_l2: None,
            setpoint_reactive_l3: None,
            preconditioning_request: None,
            evse_sleep: None,
            v2x_baseline: None,
            operation_mode: None,
            v2x_freq_watt_curve: Vec::new(),
            v2x_signal_watt_curve: Vec::new(),
            custom_data: None,
        }
    }

    /// Period with a charge limit; rejects negative limits
    pub fn new(start_period: u32, limit: Decimal) -> Result<Self, ValidationError> {
        let period = Self {
            limit: Some(limit),
            ..Self::starting_at(start_period)
        };
        period.validate()?;
        Ok(period)
    }
}

impl Validate for ChargingSchedulePeriod {
    fn validate(&self) -> Result<(), ValidationError> {
        for (field, limit) in [("limit", self.limit), ("limit_L2", self.limit_l2), ("limit_L3", self.limit_l3)] {
            if limit.is_some_and(Decimal::is_negative) {
                return Err(ValidationError::new(field, "must not be negative"));
            }
        }
        for (field, limit) in [
            ("dischargeLimit", self.discharge_limit),
            ("dischargeLimit_L2", self.discharge_limit_l2),
            ("dischargeLimit_L3", self.discharge_limit_l3),
        ] {
            if limit.is_some_and(Decimal::is_positive) {
                return Err(ValidationError::new(field, "must not be positive"));
            }
        }
        if let Some(phases) = self.number_phases {
            if !(1..=3).contains(&phases) {
                return Err(ValidationError::new("numberPhases", format!("{} is not in 1..=3", phases)));
            }
        }
        if let Some(phase) = self.phase_to_use {
            if !(1..=3).contains(&phase) {
                return Err(ValidationError::new("phaseToUse", format!("{} is not in 1..=3", phase)));
            }
            if self.number_phases != Some(1) {
                return Err(ValidationError::new("phaseToUse", "only allowed with numberPhases = 1"));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChargingSchedule {
    pub id: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_schedule: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<u32>,
    pub charging_rate_unit: ChargingRateUnit,
    pub charging_schedule_period: Vec<ChargingSchedulePeriod>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_charging_rate: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_data: Option<CustomData>,
}

impl ChargingSchedule {
    pub fn new(
        id: i32,
        charging_rate_unit: ChargingRateUnit,
        periods: Vec<ChargingSchedulePeriod>,
    ) -> Result<Self, ValidationError> {
        let schedule = Self {
            id,
            start_schedule: None,
            duration: None,
            charging_rate_unit,
            charging_schedule_period: periods,
            min_charging_rate: None,
            custom_data: None,
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

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChargingProfile {
    pub id: i32,
    pub stack_level: u32,
    pub charging_profile_purpose: ChargingProfilePurpose,
    pub charging_profile_kind: ChargingProfileKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recurrency_kind: Option<RecurrencyKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub valid_from: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub valid_to: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transaction_id: Option<CiString36>,
    /// One to three schedules
    pub charging_schedule: Vec<ChargingSchedule>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_data: Option<CustomData>,
}

impl ChargingProfile {
    /// Non-recurring profile; `Recurring` needs [`ChargingProfile::recurring`]
    pub fn new(
        id: i32,
        stack_level: u32,
        purpose: ChargingProfilePurpose,
        kind: ChargingProfileKind,
        schedules: Vec<ChargingSchedule>,
    ) -> Result<Self, ValidationError> {
        let profile = Self {
            id,
            stack_level,
            charging_profile_purpose: purpose,
            charging_profile_kind: kind,
            recurrency_kind: None,
            valid_from: None,
            valid_to: None,
            transaction_id: None,
            charging_schedule: schedules,
            custom_data: None,
        };
        profile.validate()?;
        Ok(profile)
    }

    pub fn recurring(
        id: i32,
        stack_level: u32,
        purpose: ChargingProfilePurpose,
        recurrency: RecurrencyKind,
        schedules: Vec<ChargingSchedule>,
    ) -> Result<Self, ValidationError> {
        let profile = Self {
            id,
            stack_level,
            charging_profile_purpose: purpose,
            charging_profile_kind: ChargingProfileKind::Recurring,
            recurrency_kind: Some(recurrency),
            valid_from: None,
            valid_to: None,
            transaction_id: None,
            charging_schedule: schedules,
            custom_data: None,
        };
        profile.validate()?;
        Ok(profile)
    }
}

impl Validate for ChargingProfile {
    fn validate(&self) -> Result<(), ValidationError> {
        if !(1..=3).contains(&self.charging_schedule.len()) {
            return Err(ValidationError::new(
                "chargingSchedule",
                format!("{} schedules, expected 1..=3", self.charging_schedule.len()),
            ));
        }
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
        let mut ids = HashSet::new();
        for (index, schedule) in self.charging_schedule.iter().enumerate() {
            let field = format!("chargingSchedule[{}]", index);
            schedule.validate().map_err(|e| e.within(&field))?;
            if !ids.insert(schedule.id) {
                return Err(ValidationError::new(format!("{}.id", field), "duplicate schedule id"));
            }
        }
        Ok(())
    }
}

/// Filter for ClearChargingProfile
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClearChargingProfile {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub evse_id: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub charging_profile_purpose: Option<ChargingProfilePurpose>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stack_level: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_data: Option<CustomData>,
}

/// Validate each entry of a list, reporting the index of the first bad one
pub(crate) fn validate_each<T: Validate>(field: &str, items: &[T]) -> Result<(), ValidationError> {
    for (index, item) in items.iter().enumerate() {
        item.validate()
            .map_err(|e| e.within(&format!("{}[{}]", field, index)))?;
    }
    Ok(())
}

/// EVSE and connector ids start at 1; 0 addresses the whole station
pub(crate) fn positive_id(field: &str, id: u32) -> Result<(), ValidationError> {
    if id == 0 {
        return Err(ValidationError::new(field, "must be greater than 0"));
    }
    Ok(())
}

/// Lists that the schema declares with `minItems: 1`
pub(crate) fn non_empty<T>(field: &str, items: &[T]) -> Result<(), ValidationError> {
    if items.is_empty() {
        return Err(ValidationError::new(field, "at least one entry is required"));
    }
    Ok(())
}

unconstrained!(
    StatusInfo,
    AdditionalInfo,
    IdToken,
    MessageContent,
    Evse,
    Component,
    Variable,
    ChargingStation,
    UnitOfMeasure,
    SampledValue,
    ClearChargingProfile,
);
