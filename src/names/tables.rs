//! Built-in J1587 name and metadata tables
//!
//! A representative subset of the standard assignments. The status-group
//! mask/value pairs are the wire format itself: the deliberately redundant
//! "don't care" bits keep every named state distinct within its group, and
//! must not be simplified.

use super::{PidInfo, PidKind, Scale};
use crate::protocol::bitfield::{GroupDef, GroupField};
use crate::protocol::MULTISECTION_PIDS;

fn group(name: &'static str, fields: Vec<GroupField>) -> GroupDef {
    GroupDef::new(name, fields).expect("built-in status group definitions are valid")
}

/// MID name assignments, range-keyed
pub(super) fn mid_names() -> Vec<(u16, u16, &'static str)> {
    vec![
        (0, 7, "J1708: Engine"),
        (8, 9, "J1708: Brakes, Tractor"),
        (10, 10, "Trailer ABS Indicator Lamp ON"),
        (11, 11, "Trailer ABS Indicator Lamp OFF"),
        (12, 13, "J1708: Tires, Tractor"),
        (14, 15, "J1708: Tires, Trailer"),
        (16, 17, "J1708: Suspension, Tractor"),
        (18, 19, "J1708: Suspension, Trailer"),
        (20, 27, "J1708: Transmission"),
        (28, 29, "J1708: Electrical Charging System"),
        (30, 32, "J1708: Electrical"),
        (33, 35, "J1708: Cargo Refrigeration/Heating"),
        (36, 40, "J1708: Instrument Cluster"),
        (41, 45, "J1708: Driver Information Center"),
        (46, 47, "J1708: Cab Climate Control"),
        (48, 55, "J1708: Diagnostic Systems"),
        (56, 61, "J1708: Trip Recorder"),
        (62, 63, "J1708: Turbocharger"),
        (64, 68, "J1708: Off-Board Diagnostics"),
        (69, 86, "J1922"),
        (87, 87, "Trailer ABS Active"),
        (88, 110, "J1708: Dynamic MID Assignment"),
        (111, 111, "J1708: Factory Electronic Module Tester (Off Vehicle)"),
        (128, 128, "Engine #1"),
        (129, 129, "Turbocharger"),
        (130, 130, "Transmission"),
        (131, 131, "Power Takeoff"),
        (132, 132, "Axle, Power Unit"),
        (133, 133, "Axle, Trailer"),
        (136, 136, "Brakes, Power Unit"),
        (137, 137, "Brakes, Trailer #1"),
        (138, 138, "Brakes, Trailer #2"),
        (139, 139, "Brakes, Trailer #3"),
        (140, 140, "Instrument Cluster"),
        (141, 141, "Trip Recorder"),
        (142, 142, "Vehicle Management System"),
        (143, 143, "Fuel System"),
        (144, 144, "Cruise Control"),
        (145, 145, "Road Speed Indicator"),
        (146, 146, "Cab Climate Control"),
        (147, 147, "Cargo Refrigeration / Heating, Trailer"),
        (150, 150, "Suspension, Power Unit"),
        (151, 151, "Suspension, Trailer"),
        (154, 154, "Diagnostic Systems, Power Unit"),
        (155, 155, "Diagnostic Systems, Trailer"),
        (157, 157, "Park Brake Controller"),
        (158, 158, "Electrical Charging System"),
        (159, 159, "Proximity Detector, Front"),
        (160, 160, "Proximity Detector, Rear"),
        (161, 161, "Aerodynamic Control Unit"),
        (162, 162, "Vehicle Navigation Unit"),
        (163, 163, "Vehicle Security"),
        (171, 171, "Driver Information Center #1"),
        (172, 172, "Off-board Diagnostics #1"),
        (173, 173, "Off-board Diagnostics #2"),
        (178, 178, "Vehicle Sensors to Data Converter"),
        (179, 179, "Data Logging Computer"),
        (181, 181, "Communication Unit, Ground"),
        (188, 188, "Vehicle Location Unit, Tractor"),
        (206, 206, "Brakes, Power Unit #2"),
        (217, 217, "Collision Avoidance System"),
        (219, 219, "Collision Avoidance Radar"),
        (248, 248, "Forward Road Image Processor"),
        (253, 253, "Brake Stroke Alert Monitor, Tractor"),
        (254, 254, "Safety Restraint System #2"),
    ]
}

/// PID name assignments
pub(super) fn pid_names() -> Vec<(u16, u16, &'static str)> {
    vec![
        (0, 0, "Request Parameter"),
        (8, 8, "Brake System Air Pressure Low Warning Switch Status"),
        (9, 9, "Axle Lift Status"),
        (10, 10, "Axle Slider Status"),
        (11, 11, "Cargo Securement"),
        (44, 44, "Attention/Warning Indicator Lamps Status"),
        (49, 49, "ABS Control Status"),
        (65, 65, "Brake Switch Status"),
        (70, 70, "Parking Brake Switch Status"),
        (71, 71, "Idle Shutdown Timer Status"),
        (83, 83, "Road Speed Limit Status"),
        (84, 84, "Road Speed"),
        (85, 85, "Cruise Control Status"),
        (89, 89, "Power Takeoff Status"),
        (91, 91, "Percent Accelerator Pedal Position"),
        (96, 96, "Fuel Level"),
        (108, 108, "Barometric Pressure"),
        (110, 110, "Engine Coolant Temperature"),
        (128, 128, "Component-specific Parameter Request"),
        (151, 151, "ATC Control Status"),
        (154, 154, "Auxiliary Input and Output Status #2"),
        (155, 155, "Auxiliary Input and Output Status #1"),
        (168, 168, "Battery Potential (Voltage)"),
        (171, 171, "Ambient Air Temperature"),
        (177, 177, "Transmission Oil Temperature"),
        (183, 183, "Engine Retarder Status"),
        (190, 190, "Engine Speed"),
        (192, 192, "Multisection Parameter"),
        (194, 194, "Transmitter System Diagnostic Code and Occurrence Count Table"),
        (195, 195, "Diagnostic Data Request/Clear Count"),
        (196, 196, "Diagnostic Data/Count Clear Response"),
        (237, 237, "Vehicle Identification Number"),
        (243, 243, "Component Identification"),
        (245, 245, "Total Vehicle Distance"),
        (247, 247, "Total Engine Hours"),
        (448, 448, "Multisection Parameter"),
    ]
}

fn scaled(
    name: &'static str,
    signed: bool,
    width: usize,
    scale: Scale,
    units: Option<&'static str>,
) -> PidInfo {
    PidInfo {
        name,
        kind: PidKind::Scaled {
            signed,
            width,
            scale,
            units,
        },
    }
}

fn status(name: &'static str, def: GroupDef) -> PidInfo {
    PidInfo {
        name,
        kind: PidKind::Status(def),
    }
}

/// Per-PID decode metadata, sorted by PID for binary search
#[allow(clippy::too_many_lines)]
pub(super) fn pid_info() -> Vec<(u16, PidInfo)> {
    let mut info = vec![
        (
            8,
            status(
                "Brake System Air Pressure Low Warning Switch Status",
                group(
                    "BrakeSystemAirPressureLowWarningSwitchStatus",
                    vec![
                        GroupField::flag("TRAILER_EMERGENCY_SUPPLY_ERROR", 0b1011_1111, 0xC0),
                        GroupField::flag("TRAILER_EMERGENCY_SUPPLY_ON", 0b0111_1111, 0xC0),
                        GroupField::flag("TRAILER_EMERGENCY_SUPPLY_OFF", 0b0011_1111, 0xC0),
                        GroupField::flag("TRAILER_SERVICE_SUPPLY_ERROR", 0b1110_1111, 0x30),
                        GroupField::flag("TRAILER_SERVICE_SUPPLY_ON", 0b1101_1111, 0x30),
                        GroupField::flag("TRAILER_SERVICE_SUPPLY_OFF", 0b1100_1111, 0x30),
                        GroupField::flag("TRACTOR_SECONDARY_SUPPLY_ERROR", 0b1111_1011, 0x0C),
                        GroupField::flag("TRACTOR_SECONDARY_SUPPLY_ON", 0b1111_0111, 0x0C),
                        GroupField::flag("TRACTOR_SECONDARY_SUPPLY_OFF", 0b1111_0011, 0x0C),
                        GroupField::flag("TRACTOR_PRIMARY_SUPPLY_ERROR", 0b1111_1110, 0x03),
                        GroupField::flag("TRACTOR_PRIMARY_SUPPLY_ON", 0b1111_1101, 0x03),
                        GroupField::flag("TRACTOR_PRIMARY_SUPPLY_OFF", 0b1111_1100, 0x03),
                    ],
                ),
            ),
        ),
        (
            9,
            status(
                "Axle Lift Status",
                group(
                    "AxleLiftStatus",
                    vec![
                        GroupField::flag("POSITION_ERROR", 0b1111_1011, 0x0C),
                        GroupField::flag("UP", 0b1111_0111, 0x0C),
                        GroupField::flag("DOWN", 0b1111_0011, 0x0C),
                        GroupField::flag("SWITCH_ERROR", 0b1111_1110, 0x03),
                        GroupField::flag("ON", 0b1111_1101, 0x03),
                        GroupField::flag("OFF", 0b1111_1100, 0x03),
                    ],
                ),
            ),
        ),
        (
            10,
            status(
                "Axle Slider Status",
                group(
                    "AxleSliderStatus",
                    vec![
                        GroupField::flag("SLIDER_LOCK_ERROR", 0b1111_1011, 0x0C),
                        GroupField::flag("LOCKED", 0b1111_0111, 0x0C),
                        GroupField::flag("UNLOCKED", 0b1111_0011, 0x0C),
                        GroupField::flag("SLIDER_LOCKSWITCH_ERROR", 0b1111_1110, 0x03),
                        GroupField::flag("ON", 0b1111_1101, 0x03),
                        GroupField::flag("OFF", 0b1111_1100, 0x03),
                    ],
                ),
            ),
        ),
        (
            11,
            status(
                "Cargo Securement",
                group(
                    "CargoSecurement",
                    vec![
                        GroupField::value("CARGO_SECTOR_NUM", 0xF0),
                        GroupField::flag("ERROR", 0b1111_1110, 0x03),
                        GroupField::flag("LOOSE", 0b1111_1101, 0x03),
                        GroupField::flag("SECURE", 0b1111_1100, 0x03),
                    ],
                ),
            ),
        ),
        (
            44,
            status(
                "Attention/Warning Indicator Lamps Status",
                group(
                    "IndicatorLampStatus",
                    vec![
                        GroupField::flag("PROTECT_ERROR", 0b1110_1111, 0x30),
                        GroupField::flag("PROTECT_ON", 0b1101_1111, 0x30),
                        GroupField::flag("PROTECT_OFF", 0b1100_1111, 0x30),
                        GroupField::flag("AMBER_ERROR", 0b1111_1011, 0x0C),
                        GroupField::flag("AMBER_ON", 0b1111_0111, 0x0C),
                        GroupField::flag("AMBER_OFF", 0b1111_0011, 0x0C),
                        GroupField::flag("RED_ERROR", 0b1111_1110, 0x03),
                        GroupField::flag("RED_ON", 0b1111_1101, 0x03),
                        GroupField::flag("RED_OFF", 0b1111_1100, 0x03),
                    ],
                ),
            ),
        ),
        (
            49,
            status(
                "ABS Control Status",
                group(
                    "AbsControlStatus",
                    vec![
                        GroupField::flag("OFF_ROAD_ERROR", 0b1011_1111, 0xC0),
                        GroupField::flag("OFF_ROAD_ON", 0b0111_1111, 0xC0),
                        GroupField::flag("OFF_ROAD_OFF", 0b0011_1111, 0xC0),
                        GroupField::flag("RETARDER_ERROR", 0b1110_1111, 0x30),
                        GroupField::flag("RETARDER_ON", 0b1101_1111, 0x30),
                        GroupField::flag("RETARDER_OFF", 0b1100_1111, 0x30),
                        GroupField::flag("BRAKE_CONTROL_ERROR", 0b1111_1011, 0x0C),
                        GroupField::flag("BRAKE_CONTROL_ON", 0b1111_0111, 0x0C),
                        GroupField::flag("BRAKE_CONTROL_OFF", 0b1111_0011, 0x0C),
                        GroupField::flag("WARNING_LAMP_ERROR", 0b1111_1110, 0x03),
                        GroupField::flag("WARNING_LAMP_ON", 0b1111_1101, 0x03),
                        GroupField::flag("WARNING_LAMP_OFF", 0b1111_1100, 0x03),
                    ],
                ),
            ),
        ),
        (
            65,
            status(
                "Brake Switch Status",
                group(
                    "BrakeSwitchStatus",
                    vec![
                        GroupField::flag("ERROR", 0b1111_1011, 0x0C),
                        GroupField::flag("ON", 0b1111_0111, 0x0C),
                        GroupField::flag("OFF", 0b1111_0011, 0x0C),
                        GroupField::flag("LAMP_ERROR", 0b1111_1110, 0x03),
                        GroupField::flag("LAMP_ON", 0b1111_1101, 0x03),
                        GroupField::flag("LAMP_OFF", 0b1111_1100, 0x03),
                    ],
                ),
            ),
        ),
        (
            70,
            status(
                "Parking Brake Switch Status",
                group(
                    "ParkingBrakeStatus",
                    vec![
                        GroupField::flag("ON", 0b1000_0000, 0x80),
                        GroupField::flag("OFF", 0b0000_0000, 0x80),
                    ],
                ),
            ),
        ),
        (
            71,
            status(
                "Idle Shutdown Timer Status",
                group(
                    "IdleShutdownTimer",
                    vec![
                        GroupField::flag("SHUTDOWN_TIMER_ACTIVE", 1 << 7, 1 << 7),
                        GroupField::flag("SHUTDOWN_TIMER_ENABLED", 1 << 3, 1 << 3),
                        GroupField::flag("OVERRIDE_ACTIVE", 1 << 2, 1 << 2),
                        GroupField::flag("ENGINE_IS_SHUTDOWN", 1 << 1, 1 << 1),
                        GroupField::flag("DRIVER_ALERT_ACTIVE", 1 << 0, 1 << 0),
                    ],
                ),
            ),
        ),
        (
            83,
            status(
                "Road Speed Limit Status",
                group(
                    "RoadSpeedLimitStatus",
                    vec![
                        GroupField::flag("ON", 0b1000_0000, 0x80),
                        GroupField::flag("OFF", 0b0000_0000, 0x80),
                    ],
                ),
            ),
        ),
        (84, scaled("Road Speed", false, 1, Scale::new(1, 2), Some("mph"))),
        (
            85,
            status(
                "Cruise Control Status",
                group(
                    "CruiseControlStatus",
                    vec![
                        GroupField::flag("ACTIVE", 1 << 7, 1 << 7),
                        GroupField::flag("CLUTCH", 1 << 6, 1 << 6),
                        GroupField::flag("BRAKE", 1 << 5, 1 << 5),
                        GroupField::flag("ACCEL", 1 << 4, 1 << 4),
                        GroupField::flag("RESUME", 1 << 3, 1 << 3),
                        GroupField::flag("COAST", 1 << 2, 1 << 2),
                        GroupField::flag("SET", 1 << 1, 1 << 1),
                        GroupField::flag("ON", 0x01, 0x01),
                        GroupField::flag("OFF", 0x00, 0x01),
                    ],
                ),
            ),
        ),
        (
            89,
            status(
                "Power Takeoff Status",
                group(
                    "PowerTakeoffStatus",
                    vec![
                        GroupField::flag("PTO_ACTIVE", 1 << 7, 1 << 7),
                        GroupField::flag("CLUTCH", 1 << 6, 1 << 6),
                        GroupField::flag("BRAKE", 1 << 5, 1 << 5),
                        GroupField::flag("ACCEL", 1 << 4, 1 << 4),
                        GroupField::flag("RESUME", 1 << 3, 1 << 3),
                        GroupField::flag("COAST", 1 << 2, 1 << 2),
                        GroupField::flag("SET", 1 << 1, 1 << 1),
                        GroupField::flag("PTO_SWITCH_ON", 1 << 0, 1 << 0),
                    ],
                ),
            ),
        ),
        (
            91,
            scaled(
                "Percent Accelerator Pedal Position",
                false,
                1,
                Scale::new(2, 5),
                Some("%"),
            ),
        ),
        (96, scaled("Fuel Level", false, 1, Scale::new(1, 2), Some("%"))),
        (
            108,
            scaled("Barometric Pressure", false, 1, Scale::new(3, 5), Some("kPa")),
        ),
        (
            110,
            scaled(
                "Engine Coolant Temperature",
                false,
                1,
                Scale::new(1, 1),
                Some("deg F"),
            ),
        ),
        (
            128,
            PidInfo {
                name: "Component-specific Parameter Request",
                kind: PidKind::Request,
            },
        ),
        (
            151,
            status(
                "ATC Control Status",
                group(
                    "AtcControlStatus",
                    vec![
                        GroupField::flag("SPINOUT_ERROR", 0b1011_1111_1111_1111, 0xC000),
                        GroupField::flag("SPINOUT_ACTIVE", 0b0111_1111_1111_1111, 0xC000),
                        GroupField::flag("SPINOUT_INACTIVE", 0b0011_1111_1111_1111, 0xC000),
                        GroupField::flag("ATC_ENGINE_CTRL_ERROR", 0b0010_1111_1111_1111, 0x3000),
                        GroupField::flag("ATC_ENGINE_CTRL_ON", 0b0001_1111_1111_1111, 0x3000),
                        GroupField::flag("ATC_ENGINE_CTRL_OFF", 0b0000_1111_1111_1111, 0x3000),
                        GroupField::flag("ATC_BRAKES_CTRL_ERROR", 0b0000_1011_1111_1111, 0x0C00),
                        GroupField::flag("ATC_BRAKES_CTRL_ON", 0b0000_0111_1111_1111, 0x0C00),
                        GroupField::flag("ATC_BRAKES_CTRL_OFF", 0b0000_0011_1111_1111, 0x0C00),
                        GroupField::flag("LAMP_ERROR", 0b0000_0010_1111_1111, 0x0300),
                        GroupField::flag("LAMP_ON", 0b0000_0001_1111_1111, 0x0300),
                        GroupField::flag("LAMP_OFF", 0b0000_0000_1111_1111, 0x0300),
                        GroupField::flag("VDC_ENGINE_CTRL_ERROR", 0b0000_0000_0010_1111, 0x0030),
                        GroupField::flag("VDC_ENGINE_CTRL_ON", 0b0000_0000_0001_1111, 0x0030),
                        GroupField::flag("VDC_ENGINE_CTRL_OFF", 0b0000_0000_0000_1111, 0x0030),
                        GroupField::flag("VDC_BRAKES_CTRL_ERROR", 0b0000_0000_0000_1011, 0x000C),
                        GroupField::flag("VDC_BRAKES_CTRL_ON", 0b0000_0000_0000_0111, 0x000C),
                        GroupField::flag("VDC_BRAKES_CTRL_OFF", 0b0000_0000_0000_0011, 0x000C),
                        GroupField::flag("ATC_MUD_SNOW_ERROR", 0b0000_0000_0000_0010, 0x0003),
                        GroupField::flag("ATC_MUD_SNOW_ON", 0b0000_0000_0000_0001, 0x0003),
                        GroupField::flag("ATC_MUD_SNOW_OFF", 0b0000_0000_0000_0000, 0x0003),
                    ],
                ),
            ),
        ),
        (
            154,
            status(
                "Auxiliary Input and Output Status #2",
                group(
                    "AuxInputOutputStatus2",
                    vec![
                        GroupField::flag("INPUT_8_ERROR", 0b1011_1111_1111_1111, 0xC000),
                        GroupField::flag("INPUT_8_ON", 0b0111_1111_1111_1111, 0xC000),
                        GroupField::flag("INPUT_8_OFF", 0b0011_1111_1111_1111, 0xC000),
                        GroupField::flag("INPUT_7_ERROR", 0b0010_1111_1111_1111, 0x3000),
                        GroupField::flag("INPUT_7_ON", 0b0001_1111_1111_1111, 0x3000),
                        GroupField::flag("INPUT_7_OFF", 0b0000_1111_1111_1111, 0x3000),
                        GroupField::flag("INPUT_6_ERROR", 0b0000_1011_1111_1111, 0x0C00),
                        GroupField::flag("INPUT_6_ON", 0b0000_0111_1111_1111, 0x0C00),
                        GroupField::flag("INPUT_6_OFF", 0b0000_0011_1111_1111, 0x0C00),
                        GroupField::flag("INPUT_5_ERROR", 0b0000_0010_1111_1111, 0x0300),
                        GroupField::flag("INPUT_5_ON", 0b0000_0001_1111_1111, 0x0300),
                        GroupField::flag("INPUT_5_OFF", 0b0000_0000_1111_1111, 0x0300),
                        GroupField::flag("OUTPUT_8_ERROR", 0b0000_0000_1011_1111, 0x00C0),
                        GroupField::flag("OUTPUT_8_ON", 0b0000_0000_0111_1111, 0x00C0),
                        GroupField::flag("OUTPUT_8_OFF", 0b0000_0000_0011_1111, 0x00C0),
                        GroupField::flag("OUTPUT_7_ERROR", 0b0000_0000_0010_1111, 0x0030),
                        GroupField::flag("OUTPUT_7_ON", 0b0000_0000_0001_1111, 0x0030),
                        GroupField::flag("OUTPUT_7_OFF", 0b0000_0000_0000_1111, 0x0030),
                        GroupField::flag("OUTPUT_6_ERROR", 0b0000_0000_0000_1011, 0x000C),
                        GroupField::flag("OUTPUT_6_ON", 0b0000_0000_0000_0111, 0x000C),
                        GroupField::flag("OUTPUT_6_OFF", 0b0000_0000_0000_0011, 0x000C),
                        GroupField::flag("OUTPUT_5_ERROR", 0b0000_0000_0000_0010, 0x0003),
                        GroupField::flag("OUTPUT_5_ON", 0b0000_0000_0000_0001, 0x0003),
                        GroupField::flag("OUTPUT_5_OFF", 0b0000_0000_0000_0000, 0x0003),
                    ],
                ),
            ),
        ),
        (
            155,
            status(
                "Auxiliary Input and Output Status #1",
                group(
                    "AuxInputOutputStatus1",
                    vec![
                        GroupField::flag("INPUT_4_ERROR", 0b1011_1111_1111_1111, 0xC000),
                        GroupField::flag("INPUT_4_ON", 0b0111_1111_1111_1111, 0xC000),
                        GroupField::flag("INPUT_4_OFF", 0b0011_1111_1111_1111, 0xC000),
                        GroupField::flag("INPUT_3_ERROR", 0b0010_1111_1111_1111, 0x3000),
                        GroupField::flag("INPUT_3_ON", 0b0001_1111_1111_1111, 0x3000),
                        GroupField::flag("INPUT_3_OFF", 0b0000_1111_1111_1111, 0x3000),
                        GroupField::flag("INPUT_2_ERROR", 0b0000_1011_1111_1111, 0x0C00),
                        GroupField::flag("INPUT_2_ON", 0b0000_0111_1111_1111, 0x0C00),
                        GroupField::flag("INPUT_2_OFF", 0b0000_0011_1111_1111, 0x0C00),
                        GroupField::flag("INPUT_1_ERROR", 0b0000_0010_1111_1111, 0x0300),
                        GroupField::flag("INPUT_1_ON", 0b0000_0001_1111_1111, 0x0300),
                        GroupField::flag("INPUT_1_OFF", 0b0000_0000_1111_1111, 0x0300),
                        GroupField::flag("OUTPUT_4_ERROR", 0b0000_0000_1011_1111, 0x00C0),
                        GroupField::flag("OUTPUT_4_ON", 0b0000_0000_0111_1111, 0x00C0),
                        GroupField::flag("OUTPUT_4_OFF", 0b0000_0000_0011_1111, 0x00C0),
                        GroupField::flag("OUTPUT_3_ERROR", 0b0000_0000_0010_1111, 0x0030),
                        GroupField::flag("OUTPUT_3_ON", 0b0000_0000_0001_1111, 0x0030),
                        GroupField::flag("OUTPUT_3_OFF", 0b0000_0000_0000_1111, 0x0030),
                        GroupField::flag("OUTPUT_2_ERROR", 0b0000_0000_0000_1011, 0x000C),
                        GroupField::flag("OUTPUT_2_ON", 0b0000_0000_0000_0111, 0x000C),
                        GroupField::flag("OUTPUT_2_OFF", 0b0000_0000_0000_0011, 0x000C),
                        GroupField::flag("OUTPUT_1_ERROR", 0b0000_0000_0000_0010, 0x0003),
                        GroupField::flag("OUTPUT_1_ON", 0b0000_0000_0000_0001, 0x0003),
                        GroupField::flag("OUTPUT_1_OFF", 0b0000_0000_0000_0000, 0x0003),
                    ],
                ),
            ),
        ),
        (
            168,
            scaled(
                "Battery Potential (Voltage)",
                false,
                2,
                Scale::new(1, 20),
                Some("V"),
            ),
        ),
        (
            171,
            scaled(
                "Ambient Air Temperature",
                true,
                2,
                Scale::new(1, 4),
                Some("deg F"),
            ),
        ),
        (
            177,
            scaled(
                "Transmission Oil Temperature",
                true,
                2,
                Scale::new(1, 4),
                Some("deg F"),
            ),
        ),
        (
            183,
            status(
                "Engine Retarder Status",
                group(
                    "EngineRetarderStatus",
                    vec![
                        GroupField::flag("ON", 0b1000_0000, 0x80),
                        GroupField::flag("OFF", 0b0000_0000, 0x80),
                        GroupField::flag("CYL8_ACTIVE", 0b0001_0000, 0x10),
                        GroupField::flag("CYL6_ACTIVE", 0b0000_1000, 0x08),
                        GroupField::flag("CYL4_ACTIVE", 0b0000_0100, 0x04),
                        GroupField::flag("CYL3_ACTIVE", 0b0000_0010, 0x02),
                        GroupField::flag("CYL2_ACTIVE", 0b0000_0001, 0x01),
                    ],
                ),
            ),
        ),
        (
            190,
            scaled("Engine Speed", false, 2, Scale::new(1, 4), Some("rpm")),
        ),
        (
            194,
            PidInfo {
                name: "Transmitter System Diagnostic Code and Occurrence Count Table",
                kind: PidKind::DtcList,
            },
        ),
        (
            195,
            PidInfo {
                name: "Diagnostic Data Request/Clear Count",
                kind: PidKind::DtcRequest,
            },
        ),
        (
            196,
            PidInfo {
                name: "Diagnostic Data/Count Clear Response",
                kind: PidKind::DtcResponse,
            },
        ),
        (
            245,
            scaled(
                "Total Vehicle Distance",
                false,
                4,
                Scale::new(1, 10),
                Some("mi"),
            ),
        ),
        (
            247,
            scaled(
                "Total Engine Hours",
                false,
                4,
                Scale::new(1, 20),
                Some("hours"),
            ),
        ),
    ];

    for pid in MULTISECTION_PIDS {
        info.push((
            pid,
            PidInfo {
                name: "Multisection Parameter",
                kind: PidKind::Section,
            },
        ));
    }

    info.sort_by_key(|&(pid, _)| pid);
    info
}

#[cfg(test)]
mod tests {
    use super::*;

    // Construction validates the mask/value uniqueness invariants; a typo in
    // any table above fails here instead of at decode time.
    #[test]
    fn test_all_builtin_groups_construct() {
        let info = pid_info();
        assert!(!info.is_empty());
    }

    #[test]
    fn test_aux_io_group_decode() {
        let info = pid_info();
        let (_, entry) = info
            .iter()
            .find(|&&(id, _)| id == 155)
            .expect("aux input/output status #1");
        let PidKind::Status(def) = &entry.kind else {
            panic!("PID 155 must be a status group");
        };

        // INPUT_1 ON, everything else OFF
        let flags = def.decode_flags(0x0100);
        assert!(flags.contains(&"INPUT_1_ON"));
        assert!(flags.contains(&"INPUT_2_OFF"));
        assert!(flags.contains(&"OUTPUT_4_OFF"));
        assert!(!flags.contains(&"INPUT_1_OFF"));
    }

    #[test]
    fn test_dtc_pids_have_composite_metadata() {
        let info = pid_info();
        let kind_of = |pid: u16| {
            info.iter()
                .find(|&&(id, _)| id == pid)
                .map(|(_, entry)| &entry.kind)
        };
        assert!(matches!(kind_of(194), Some(PidKind::DtcList)));
        assert!(matches!(kind_of(195), Some(PidKind::DtcRequest)));
        assert!(matches!(kind_of(196), Some(PidKind::DtcResponse)));
    }

    #[test]
    fn test_multisection_pids_present() {
        let info = pid_info();
        for pid in MULTISECTION_PIDS {
            let entry = info.iter().find(|&&(id, _)| id == pid);
            assert!(
                matches!(entry, Some((_, PidInfo { kind: PidKind::Section, .. }))),
                "PID {pid} missing section metadata"
            );
        }
    }
}
